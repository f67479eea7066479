//! Text and HTML rendering of solutions, solve summaries and threat maps.
//!
//! Boards are drawn one line per column of the placement, with the queen at
//! the character position of its row, on a `-+` checkerboard.

use std::fmt::Write;

use crate::bitboard::Bitboard;
use crate::error::Result;
use crate::scan::SENTINEL;
use crate::search::SearchCounters;
use crate::solution::Solution;
use crate::solver::SolveReport;
use crate::symmetry;

/// Boards per line group in text output.
pub const TEXT_BOARDS_PER_LINE: usize = 9;
/// Boards per table row in HTML output.
pub const HTML_BOARDS_PER_ROW: usize = 5;

const BOARD_SEPARATOR: &str = "    ";
const HTML_QUEEN: &str = "&#9819;";

#[inline]
fn checker(line: usize, pos: usize) -> char {
    if (line + pos) % 2 == 0 { '-' } else { '+' }
}

/// One string per column of the placement, `N` characters wide.
pub fn board_rows(solution: &Solution, board_size: usize) -> Vec<String> {
    solution
        .rows()
        .iter()
        .take(board_size)
        .enumerate()
        .map(|(line, &queen)| {
            (0..board_size)
                .map(|pos| {
                    if pos == queen as usize {
                        'Q'
                    } else {
                        checker(line, pos)
                    }
                })
                .collect()
        })
        .collect()
}

/// Boards side by side, [`TEXT_BOARDS_PER_LINE`] per group.
pub fn render_boards(solutions: &[Solution], board_size: usize) -> String {
    let boards: Vec<Vec<String>> = solutions
        .iter()
        .map(|s| board_rows(s, board_size))
        .collect();

    let mut out = String::new();
    for group in boards.chunks(TEXT_BOARDS_PER_LINE) {
        for line in 0..board_size {
            for board in group {
                out.push_str(&board[line]);
                out.push_str(BOARD_SEPARATOR);
            }
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

/// HTML `<table>` of boards, [`HTML_BOARDS_PER_ROW`] per row.
pub fn render_html_table(solutions: &[Solution], board_size: usize) -> String {
    let mut out = String::from("\n<table class='vertical.center'><tbody>\n");
    for group in solutions.chunks(HTML_BOARDS_PER_ROW) {
        for line in 0..board_size {
            out.push_str("<tr>\n");
            for solution in group {
                let queen = solution.rows()[line] as usize;
                for pos in 0..board_size {
                    let class = if (line + pos) % 2 == 0 { "yellow" } else { "black" };
                    let piece = if pos == queen { HTML_QUEEN } else { "" };
                    let _ = write!(out, "<td class='{class} cell'>{piece}</td>");
                }
                out.push_str("<td class='wide cell' />");
            }
            out.push_str("</tr>\n");
        }
        out.push_str("<tr><td class='cell' /></tr>\n");
    }
    out.push_str("</tbody></table>\n");
    out
}

/// The one-line account of a solve: failures, raw successes and displayed solutions.
pub fn render_summary(counters: &SearchCounters, shown: usize, board_size: usize) -> String {
    let how = if shown as u64 > counters.successes {
        "filled by symmetry to"
    } else {
        "showing only"
    };
    format!(
        "We had {} failures, and {} solutions ({how} {shown}) in half a board of size {board_size} by {board_size}.",
        counters.failures, counters.successes
    )
}

/// Summary, full-board total and the expanded boards of a solve.
pub fn render_report(report: &SolveReport) -> Result<String> {
    let expanded = symmetry::expand(&report.solutions, report.board_size)?;
    let mut out = render_summary(&report.counters, expanded.len(), report.board_size);
    let _ = writeln!(
        out,
        "\nTotal on the full board: {} solutions.",
        report.counters.total_solutions()
    );
    if report.counters.successes > report.solutions.len() as u64 {
        let _ = writeln!(out, "The chosen {} solutions are:\n", expanded.len());
    } else {
        out.push_str("The solutions are:\n\n");
    }
    out.push_str(&render_boards(&expanded, report.board_size));
    if let Some(stats) = &report.stats {
        out.push_str(&stats.summary());
        out.push('\n');
    }
    Ok(out)
}

/// Debug picture of a threat map: `Q` placed queen, `*` threatened square.
/// Each line ends with the raw lane in hex.
pub fn render_threat_map<B: Bitboard>(map: &B, placement: &[i8], board_size: usize) -> String {
    let mut out = String::new();
    for row in 0..board_size {
        for col in 0..board_size {
            let queen = placement
                .get(col)
                .is_some_and(|&r| r != SENTINEL && r as usize == row);
            let c = if queen {
                'Q'
            } else if map.is_set(row, col) {
                '*'
            } else {
                checker(row, col)
            };
            out.push(c);
        }
        let _ = writeln!(out, " 0x{:x}", map.lane(row));
    }
    out
}
