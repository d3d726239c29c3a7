use crate::types::report::{
    Breakdown, FinalRank, Leaderboard, RankPerJudge, ResultReport, ResultView, Scoresheet, Winner,
};
use crate::types::scoring::{Rank, Score};

pub fn to_markdown(report: &ResultReport, decimals: usize) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "# {} ({})\n\n",
        report.event.name,
        report.event.date.format("%Y-%m-%d")
    ));
    output.push_str(&format!("Snapshot: `{}`\n\n", report.snapshot_digest));

    let table = Table { decimals };
    match &report.view {
        ResultView::Leaderboard(view) => table.leaderboard(view, &mut output),
        ResultView::Winner(view) => table.winner(view, &mut output),
        ResultView::RankPerJudge(view) => table.rank_per_judge(view, &mut output),
        ResultView::FinalRank(view) => table.final_rank(view, &mut output),
        ResultView::Breakdown(view) => table.breakdown(view, &mut output),
        ResultView::Scoresheet(view) => table.scoresheet(view, &mut output),
    }
    output
}

struct Table {
    decimals: usize,
}

impl Table {
    fn score(&self, value: Score) -> String {
        format!("{value:.prec$}", prec = self.decimals)
    }

    fn leaderboard(&self, view: &Leaderboard, output: &mut String) {
        output.push_str(&format!("## {}\n\n", view.category.name));

        let mut header = vec!["#".to_string(), "Contestant".to_string()];
        for judge in &view.judges {
            header.push(format!("J{} {}", judge.number, judge.name));
            header.push(format!("J{} rank", judge.number));
        }
        header.push("Rank sum".to_string());
        header.push("Final".to_string());
        push_header(output, &header);

        for row in &view.rows {
            let mut cells = vec![row.contestant.number.to_string(), row.contestant.name.clone()];
            for cell in &row.cells {
                cells.push(self.score(cell.score));
                cells.push(rank(cell.rank));
            }
            cells.push(rank(row.rank_sum));
            cells.push(rank(row.final_rank));
            push_row(output, &cells, row.highlighted);
        }
    }

    fn winner(&self, view: &Winner, output: &mut String) {
        output.push_str(&format!("## {}\n\n", view.category.name));
        match &view.winner {
            Some(entry) => output.push_str(&format!(
                "Winner: **#{} {}** with {}\n",
                entry.contestant.number,
                entry.contestant.name,
                self.score(entry.total)
            )),
            None => output.push_str("Winner: none (no scores yet)\n"),
        }
    }

    fn rank_per_judge(&self, view: &RankPerJudge, output: &mut String) {
        output.push_str("## Rank per judge\n\n");

        let mut header = vec!["#".to_string(), "Contestant".to_string()];
        header.extend(
            view.judges
                .iter()
                .map(|judge| format!("J{} {}", judge.number, judge.name)),
        );
        header.push("Rank sum".to_string());
        header.push("Place".to_string());
        push_header(output, &header);

        for row in &view.rows {
            let mut cells = vec![row.contestant.number.to_string(), row.contestant.name.clone()];
            cells.extend(row.ranks.iter().map(|value| rank(*value)));
            cells.push(rank(row.rank_sum));
            cells.push(
                row.placement
                    .map(|placement| placement.label().to_string())
                    .unwrap_or_default(),
            );
            push_row(output, &cells, row.placement.is_some());
        }
    }

    fn final_rank(&self, view: &FinalRank, output: &mut String) {
        output.push_str("## Final rank\n\n");
        push_header(
            output,
            &["Final", "#", "Contestant", "Total score", "Rank sum"].map(str::to_string),
        );
        for row in &view.rows {
            let cells = [
                rank(row.final_rank),
                row.contestant.number.to_string(),
                row.contestant.name.clone(),
                self.score(row.total_score),
                rank(row.rank_sum),
            ];
            push_row(output, &cells, row.podium);
        }
    }

    fn breakdown(&self, view: &Breakdown, output: &mut String) {
        output.push_str(&format!(
            "## #{} {}\n\n",
            view.contestant.number, view.contestant.name
        ));

        let mut header = vec!["Judge".to_string()];
        header.extend(view.categories.iter().map(|category| category.name.clone()));
        header.push("Total".to_string());
        header.push("Rank".to_string());
        push_header(output, &header);

        for row in &view.rows {
            let mut cells = vec![format!("J{} {}", row.judge.number, row.judge.name)];
            cells.extend(row.scores.iter().map(|value| self.score(*value)));
            cells.push(self.score(row.total));
            cells.push(rank(row.rank));
            push_row(output, &cells, false);
        }

        let mut footer = vec!["Total".to_string()];
        footer.extend(view.category_totals.iter().map(|value| self.score(*value)));
        footer.push(self.score(view.grand_total));
        footer.push(rank(view.rank_sum));
        push_row(output, &footer, true);

        output.push_str(&format!("\nFinal rank: {}\n", rank(view.final_rank)));
    }

    fn scoresheet(&self, view: &Scoresheet, output: &mut String) {
        output.push_str(&format!(
            "## Scoresheet: J{} {}{}\n\n",
            view.judge.number,
            view.judge.name,
            if view.locked { " (locked)" } else { "" }
        ));

        let mut header = vec!["#".to_string(), "Contestant".to_string()];
        for group in &view.categories {
            for sub in &group.subs {
                header.push(match sub.weight {
                    Some(weight) => format!("{} ({})", sub.name, self.score(weight)),
                    None => sub.name.clone(),
                });
            }
            header.push(group.category.name.clone());
        }
        header.push("Total".to_string());
        push_header(output, &header);

        for row in &view.rows {
            let mut cells = vec![row.contestant.number.to_string(), row.contestant.name.clone()];
            let mut values = row.values.iter();
            for (group, subtotal) in view.categories.iter().zip(&row.category_totals) {
                for value in values.by_ref().take(group.subs.len()) {
                    cells.push(value.map(|v| self.score(v)).unwrap_or_else(|| "-".to_string()));
                }
                cells.push(self.score(*subtotal));
            }
            cells.push(self.score(row.total));
            push_row(output, &cells, false);
        }
    }
}

/// Whole ranks print as integers, averaged ranks with one decimal.
fn rank(value: Rank) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

/// Pipes inside a cell would split it into two columns.
fn escape(cell: &str) -> String {
    cell.replace('|', "\\|")
}

fn push_header(output: &mut String, columns: &[String]) {
    let columns = columns.iter().map(|column| escape(column)).collect::<Vec<_>>();
    output.push_str(&format!("| {} |\n", columns.join(" | ")));
    output.push_str(&format!(
        "|{}|\n",
        columns.iter().map(|_| "---").collect::<Vec<_>>().join("|")
    ));
}

fn push_row(output: &mut String, cells: &[String], highlighted: bool) {
    let cells = cells
        .iter()
        .map(|cell| {
            let cell = escape(cell);
            if highlighted && !cell.is_empty() {
                format!("**{cell}**")
            } else {
                cell
            }
        })
        .collect::<Vec<_>>();
    output.push_str(&format!("| {} |\n", cells.join(" | ")));
}
