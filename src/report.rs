use crate::model::{RideId, WeekPlan};
use std::fmt::Write as _;

/// Permet de customiser le rendu du planning (HTML, texte, etc.).
pub trait PlanRenderer {
    fn render(&self, plan: &WeekPlan, rides: &[RideId]) -> String;
}

/// Tableau HTML : une ligne par attraction, une colonne par jour.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlTable;

impl PlanRenderer for HtmlTable {
    fn render(&self, plan: &WeekPlan, rides: &[RideId]) -> String {
        let mut out = String::new();
        out.push_str("<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Ride checks</title></head>\n<body>\n<table>\n");

        out.push_str("<tr><th>Ride</th>");
        for day in plan.keys() {
            let _ = write!(out, "<th>{day}</th>");
        }
        out.push_str("</tr>\n");

        for ride in rides {
            let _ = write!(out, "<tr><td>{}</td>", escape(ride.as_str()));
            for assignment in plan.values() {
                let cell = assignment
                    .get(ride)
                    .map(|worker| escape(worker.as_str()))
                    .unwrap_or_else(|| "-".to_string());
                let _ = write!(out, "<td>{cell}</td>");
            }
            out.push_str("</tr>\n");
        }

        out.push_str("</table>\n</body>\n</html>\n");
        out
    }
}

/// Tableau texte aligné, destiné au terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextTable;

impl PlanRenderer for TextTable {
    fn render(&self, plan: &WeekPlan, rides: &[RideId]) -> String {
        let mut columns: Vec<Vec<String>> = Vec::with_capacity(plan.len() + 1);

        let mut first = vec!["ride".to_string()];
        first.extend(rides.iter().map(|r| r.as_str().to_string()));
        columns.push(first);

        for (day, assignment) in plan {
            let mut col = vec![day.to_string()];
            col.extend(rides.iter().map(|ride| {
                assignment
                    .get(ride)
                    .map_or_else(|| "-".to_string(), |w| w.as_str().to_string())
            }));
            columns.push(col);
        }

        let widths: Vec<usize> = columns
            .iter()
            .map(|col| col.iter().map(|c| c.chars().count()).max().unwrap_or(0))
            .collect();

        let mut out = String::new();
        for row in 0..=rides.len() {
            let line: Vec<String> = columns
                .iter()
                .zip(&widths)
                .map(|(col, w)| format!("{:<w$}", col[row], w = *w))
                .collect();
            out.push_str(line.join(" | ").trim_end());
            out.push('\n');
        }
        out
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
