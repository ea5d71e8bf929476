//! Result rendering: JSON for machines, tables for people.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use nexus_index::NexusIndexResult;
use nexus_stage::{CategoryTag, StageScoringResult};
use serde::Serialize;

use crate::config::{OutputConfig, OutputFormat};

/// Something that can be printed in either output format.
pub trait Render: Serialize {
    fn to_table(&self) -> String;
}

/// Render a result according to the output settings.
pub fn render<T: Render>(value: &T, output: &OutputConfig) -> Result<String> {
    match output.format {
        OutputFormat::Json => to_json(value, output.pretty),
        OutputFormat::Table => Ok(value.to_table()),
    }
}

pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).fg(Color::Cyan))
            .collect::<Vec<_>>(),
    );
    table
}

fn tag_color(tag: CategoryTag) -> Color {
    match tag {
        CategoryTag::Maitrise => Color::Green,
        CategoryTag::EnProgression => Color::Blue,
        CategoryTag::ADecouvrir | CategoryTag::NotionNonAbordee => Color::Grey,
        CategoryTag::BasesFragiles | CategoryTag::Confusions => Color::Yellow,
        CategoryTag::Insuffisant => Color::Red,
    }
}

impl Render for StageScoringResult {
    fn to_table(&self) -> String {
        let mut summary = new_table(&["Score", "Confiance", "Précision", "Questions", "NSP"]);
        summary.add_row(vec![
            Cell::new(format!("{}/100", self.global_score)),
            Cell::new(format!("{}%", self.confidence_index)),
            Cell::new(format!("{}%", self.precision_index)),
            Cell::new(format!("{}/{}", self.total_attempted, self.total_questions)),
            Cell::new(self.total_nsp),
        ]);

        let mut categories = new_table(&[
            "Catégorie",
            "Matière",
            "Précision",
            "Confiance",
            "Points",
            "Diagnostic",
        ]);
        for score in &self.category_scores {
            categories.add_row(vec![
                Cell::new(&score.category),
                Cell::new(score.subject.as_str()),
                Cell::new(format!("{}%", score.precision)),
                Cell::new(format!("{}%", score.confidence)),
                Cell::new(format!("{}/{}", score.weighted_score, score.weighted_max)),
                Cell::new(score.tag).fg(tag_color(score.tag)),
            ]);
        }

        let mut out = format!("{summary}\n{categories}\n");
        if let Some(nsi) = &self.nsi_errors {
            out.push_str(&format!(
                "\nErreurs NSI : {} syntaxe, {} logique, {} conceptuelles ({} au total)\n",
                nsi.syntax_errors, nsi.logic_errors, nsi.conceptual_errors, nsi.total_errors
            ));
        }
        out.push_str(&format!("\n{}\n\n{}", self.diagnostic_text, self.lucidity_text));
        out
    }
}

impl Render for NexusIndexResult {
    fn to_table(&self) -> String {
        let mut pillars = new_table(&["Pilier", "Score", "Poids", "Pondéré"]);
        for pillar in &self.pillars {
            pillars.add_row(vec![
                Cell::new(&pillar.label),
                Cell::new(pillar.score),
                Cell::new(format!("{:.0}%", pillar.weight * 100.0)),
                Cell::new(pillar.weighted),
            ]);
        }

        format!(
            "{pillars}\n\nNexus Index : {}/100 ({}), tendance {}, {} points de données",
            self.global_score, self.level, self.trend, self.data_points
        )
    }
}
