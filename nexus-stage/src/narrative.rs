//! Fixed-template narrative text for stage results.

use tracing::trace;

use crate::types::BasesFragilesFlag;

/// One row of the lucidity table, keyed on (confidence index, precision index).
#[derive(Debug, Clone, Copy)]
pub struct LucidityRule {
    pub name: &'static str,
    pub matches: fn(u32, u32) -> bool,
    pub text: &'static str,
}

/// Lucidity rules in priority order. [`INTERMEDIATE_PROFILE`] applies when none match.
pub const LUCIDITY_RULES: &[LucidityRule] = &[
    LucidityRule {
        name: "assured",
        matches: |confidence, precision| confidence >= 80 && precision >= 70,
        text: "L'élève fait preuve d'assurance et de maîtrise — profil solide.",
    },
    LucidityRule {
        name: "over_confident",
        matches: |confidence, precision| confidence >= 80 && precision < 50,
        text: "L'élève tente beaucoup mais commet de nombreuses erreurs — fausses représentations à corriger.",
    },
    LucidityRule {
        name: "lucid",
        matches: |confidence, precision| confidence < 40 && precision >= 70,
        text: "L'élève fait preuve d'une grande lucidité sur ses lacunes — ce qu'il tente, il le réussit.",
    },
    LucidityRule {
        name: "hesitant",
        matches: |confidence, precision| confidence < 40 && precision < 50,
        text: "L'élève hésite beaucoup et commet des erreurs — accompagnement prioritaire nécessaire.",
    },
    LucidityRule {
        name: "partial",
        matches: |confidence, _| confidence < 60,
        text: "L'élève identifie ses zones d'incertitude — lucidité partielle, à approfondir en séance.",
    },
];

pub const INTERMEDIATE_PROFILE: &str =
    "Profil intermédiaire — des acquis solides mais des zones de fragilité à cibler.";

/// Lucidity assessment for a confidence/precision pair.
pub fn generate_lucidity_text(confidence_index: u32, precision_index: u32) -> &'static str {
    let rule = LUCIDITY_RULES
        .iter()
        .find(|rule| (rule.matches)(confidence_index, precision_index));
    trace!(
        rule = rule.map_or("intermediate", |r| r.name),
        confidence_index,
        precision_index,
        "lucidity profile"
    );
    rule.map_or(INTERMEDIATE_PROFILE, |r| r.text)
}

/// Diagnostic summary: global level, low-confidence caveat, strengths,
/// weaknesses, then Bases-Fragiles warnings, each only when relevant.
pub fn generate_diagnostic_text(
    global_score: u32,
    confidence_index: u32,
    strengths: &[String],
    weaknesses: &[String],
    bases_fragiles: &[BasesFragilesFlag],
) -> String {
    let mut parts = Vec::with_capacity(5);

    parts.push(if global_score >= 75 {
        format!("Score global de {global_score}/100 — niveau solide.")
    } else if global_score >= 50 {
        format!(
            "Score global de {global_score}/100 — niveau intermédiaire, des axes de progression identifiés."
        )
    } else {
        format!("Score global de {global_score}/100 — des lacunes significatives à combler.")
    });

    if confidence_index < 50 {
        parts.push(format!(
            "Indice de confiance faible ({confidence_index}%) — l'élève a préféré ne pas répondre à de nombreuses questions."
        ));
    }

    if !strengths.is_empty() {
        parts.push(format!("Points forts : {}.", strengths.join(", ")));
    }

    if !weaknesses.is_empty() {
        parts.push(format!("Points faibles : {}.", weaknesses.join(", ")));
    }

    if !bases_fragiles.is_empty() {
        let messages: Vec<&str> = bases_fragiles.iter().map(|b| b.message.as_str()).collect();
        parts.push(format!("Attention : {}", messages.join(" | ")));
    }

    parts.join(" ")
}
