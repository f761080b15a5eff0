//! Tone conversion prompts
//!
//! Prompt text sent to the provider when rewriting a message for a receiver.

use crate::domain::{Decision, Energy, Information, Lifestyle, Mbti};

/// System instruction framing the assistant
pub const SYSTEM_PROMPT: &str = "You are an MBTI-based communication specialist. \
Rewrite messages in the requested tone and always respond in JSON format.";

fn energy_trait(energy: Energy) -> (&'static str, &'static str) {
    match energy {
        Energy::Extraversion => (
            "Extrovert",
            "outward-directed: prefers active, direct communication",
        ),
        Energy::Introversion => (
            "Introvert",
            "inward-directed: prefers careful, in-depth communication",
        ),
    }
}

fn information_trait(information: Information) -> (&'static str, &'static str) {
    match information {
        Information::Sensing => (
            "Sensing",
            "concrete-focused: prefers specific, practical information",
        ),
        Information::Intuition => (
            "Intuition",
            "possibility-focused: prefers abstract, idea-oriented information",
        ),
    }
}

fn decision_trait(decision: Decision) -> (&'static str, &'static str) {
    match decision {
        Decision::Thinking => (
            "Thinking",
            "logic-focused: prefers logical, objective reasoning",
        ),
        Decision::Feeling => (
            "Feeling",
            "values-focused: prefers empathetic, emotionally attuned reasoning",
        ),
    }
}

fn lifestyle_trait(lifestyle: Lifestyle) -> (&'static str, &'static str) {
    match lifestyle {
        Lifestyle::Judging => (
            "Judging",
            "structure-focused: prefers systematic, planned approaches",
        ),
        Lifestyle::Perceiving => (
            "Perceiving",
            "flexibility-focused: prefers adaptive, spontaneous approaches",
        ),
    }
}

/// One line of the trait block, e.g. `- Introvert (I): inward-directed: ...`
fn trait_line(label: &str, symbol: char, description: &str) -> String {
    format!("- {} ({}): {}", label, symbol, description)
}

/// Four-line trait description, in energy/information/decision/lifestyle order
pub fn receiver_traits(mbti: &Mbti) -> String {
    let lines = [
        (mbti.energy.symbol(), energy_trait(mbti.energy)),
        (mbti.information.symbol(), information_trait(mbti.information)),
        (mbti.decision.symbol(), decision_trait(mbti.decision)),
        (mbti.lifestyle.symbol(), lifestyle_trait(mbti.lifestyle)),
    ];

    lines
        .iter()
        .map(|(symbol, (label, description))| trait_line(label, *symbol, description))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the user prompt
///
/// The original message is embedded verbatim.
pub fn build_prompt(
    original_message: &str,
    sender_mbti: &Mbti,
    receiver_mbti: &Mbti,
    tone: &str,
) -> String {
    let receiver_characteristics = receiver_traits(receiver_mbti);

    format!(
        r#"Please rewrite the following message in a '{tone}' tone.

Sender MBTI: {sender}
Receiver MBTI: {receiver}

Receiver's MBTI characteristics:
{receiver_characteristics}

Original message: {original_message}

Rewrite the message so that it comes across effectively given the receiver's MBTI characteristics,
and explain why this phrasing works well for the {receiver} type.

Respond in JSON format:
{{
    "content": "the rewritten message",
    "explanation": "why this phrasing is effective (2-3 lines)"
}}"#,
        sender = sender_mbti,
        receiver = receiver_mbti,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mbti(code: &str) -> Mbti {
        code.parse().unwrap()
    }

    #[test]
    fn receiver_traits_should_follow_dimension_order() {
        let traits = receiver_traits(&mbti("ESTJ"));
        let lines: Vec<&str> = traits.lines().collect();

        assert_eq!(
            lines,
            vec![
                "- Extrovert (E): outward-directed: prefers active, direct communication",
                "- Sensing (S): concrete-focused: prefers specific, practical information",
                "- Thinking (T): logic-focused: prefers logical, objective reasoning",
                "- Judging (J): structure-focused: prefers systematic, planned approaches",
            ]
        );
        assert!(!traits.ends_with('\n'));
    }

    #[test]
    fn receiver_traits_should_cover_second_symbols() {
        let traits = receiver_traits(&mbti("INFP"));

        assert_eq!(traits.lines().count(), 4);
        assert!(traits.contains("inward-directed: prefers careful, in-depth communication"));
        assert!(traits.contains("possibility-focused: prefers abstract, idea-oriented information"));
        assert!(traits.contains("values-focused: prefers empathetic, emotionally attuned reasoning"));
        assert!(traits.contains("flexibility-focused: prefers adaptive, spontaneous approaches"));
        assert!(!traits.contains("outward-directed"));
    }

    #[test]
    fn receiver_traits_should_pick_each_dimension_independently() {
        for code in Mbti::all() {
            let traits = receiver_traits(&code);
            let lines: Vec<&str> = traits.lines().collect();
            assert_eq!(lines.len(), 4, "{}", code);

            let symbols: String = lines
                .iter()
                .map(|line| line.split('(').nth(1).unwrap().chars().next().unwrap())
                .collect();
            assert_eq!(symbols, code.code());
        }
    }

    #[test]
    fn build_prompt_should_embed_all_inputs() {
        let message = "Can you send the report today?";
        let prompt = build_prompt(message, &mbti("ESTJ"), &mbti("INFP"), "formal");

        assert!(prompt.contains("'formal' tone"));
        assert!(prompt.contains("Sender MBTI: ESTJ"));
        assert!(prompt.contains("Receiver MBTI: INFP"));
        assert!(prompt.contains(&receiver_traits(&mbti("INFP"))));
        assert!(prompt.contains(&format!("Original message: {}", message)));
        assert!(prompt.contains("\"content\""));
        assert!(prompt.contains("\"explanation\""));
    }

    #[test]
    fn build_prompt_should_keep_message_verbatim() {
        let message = "Line one\n  \"quoted\" {braces} & <tags>\nLine three";
        let prompt = build_prompt(message, &mbti("ENTP"), &mbti("ISFJ"), "casual");

        assert!(prompt.contains(message));
    }

    #[test]
    fn system_prompt_should_require_json() {
        assert!(SYSTEM_PROMPT.contains("MBTI"));
        assert!(SYSTEM_PROMPT.contains("JSON"));
    }
}
