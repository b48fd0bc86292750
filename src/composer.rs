use crate::Segment;

/// Outcome of the code pipeline, as the composer needs to tell the three
/// cases apart: a code was read, extraction ran and came up empty, or the
/// video was never a candidate in the first place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeOutcome {
    Found(String),
    NotFound,
    NotTacticsVideo,
}

const HASHTAGS: &str = "#FC25 #EAFC #CustomTactics";
const EXCERPT_LINES: usize = 3;

/// Case-insensitive substring classification against the configured keywords
pub fn is_tactics_video(title: &str, keywords: &[String]) -> bool {
    let title = title.to_lowercase();
    keywords.iter().any(|k| title.contains(&k.to_lowercase()))
}

/// Render the templated post: keyword-selected intro, up to three transcript
/// lines, the code block when one was read, and a fixed call to action
pub fn compose_tweet(title: &str, segments: Option<&[Segment]>, outcome: &CodeOutcome) -> String {
    let mut tweet = String::new();

    tweet.push_str(&intro_line(title));
    tweet.push_str("\n\n");

    match segments {
        Some(segs) if !segs.is_empty() => {
            tweet.push_str("Key points:\n");
            for seg in segs.iter().take(EXCERPT_LINES) {
                tweet.push_str(&format!("- {}\n", seg.text));
            }
        }
        _ => tweet.push_str("Watch the full video for the breakdown.\n"),
    }

    match outcome {
        CodeOutcome::Found(code) => {
            tweet.push_str(&format!("\nCODE: {code}\n"));
        }
        CodeOutcome::NotFound => {
            tweet.push_str("\nCouldn't read the code off the video, grab it from the upload.\n");
        }
        CodeOutcome::NotTacticsVideo => {
            tweet.push_str("\nNo import code for this one.\n");
        }
    }

    tweet.push_str(&format!("\nTry it in your next match! {HASHTAGS}"));
    tweet
}

fn intro_line(title: &str) -> String {
    let lower = title.to_lowercase();
    if lower.contains("formation") {
        format!("Fresh formation breakdown: {title}")
    } else if lower.contains("tactic") {
        format!("New custom tactics just dropped: {title}")
    } else {
        format!("Worth a watch: {title}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw() -> Vec<String> {
        vec!["tactic".to_string(), "formation".to_string()]
    }

    fn segs(texts: &[&str]) -> Vec<Segment> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Segment { start: i as f64, text: t.to_string() })
            .collect()
    }

    #[test]
    fn test_classification_case_insensitive() {
        assert!(is_tactics_video("Best FORMATION guide", &kw()));
        assert!(is_tactics_video("FC25 Custom Tactics Code Reveal", &kw()));
    }

    #[test]
    fn test_classification_no_keyword() {
        assert!(!is_tactics_video("FC25 Skill Moves Tutorial", &kw()));
    }

    #[test]
    fn test_classification_substring_containment() {
        assert!(is_tactics_video("metatactics deep dive", &kw()));
    }

    #[test]
    fn test_tweet_contains_code_block() {
        let segments = segs(&["press high", "drop the wingers"]);
        let tweet = compose_tweet(
            "FC25 Custom Tactics Code Reveal",
            Some(&segments),
            &CodeOutcome::Found("AB12CD34".to_string()),
        );
        assert!(tweet.contains("CODE: AB12CD34"));
        assert!(tweet.contains("FC25 Custom Tactics Code Reveal"));
        assert!(tweet.contains(HASHTAGS));
    }

    #[test]
    fn test_excerpt_is_first_three_lines_in_order() {
        let segments = segs(&["one", "two", "three", "four"]);
        let tweet = compose_tweet("tactic video", Some(&segments), &CodeOutcome::NotFound);
        assert!(tweet.contains("- one\n- two\n- three\n"));
        assert!(!tweet.contains("- four"));
    }

    #[test]
    fn test_excerpt_shorter_transcript_uses_all_lines() {
        let segments = segs(&["only line"]);
        let tweet = compose_tweet("tactic video", Some(&segments), &CodeOutcome::NotFound);
        assert!(tweet.contains("- only line\n"));
    }

    #[test]
    fn test_placeholder_when_transcript_absent() {
        let tweet = compose_tweet("tactic video", None, &CodeOutcome::NotFound);
        assert!(tweet.contains("Watch the full video"));
        assert!(!tweet.contains("Key points:"));
    }

    #[test]
    fn test_not_found_distinct_from_not_tactics() {
        let failed = compose_tweet("tactic video", None, &CodeOutcome::NotFound);
        let skipped = compose_tweet("skill moves", None, &CodeOutcome::NotTacticsVideo);
        assert!(failed.contains("Couldn't read the code"));
        assert!(skipped.contains("No import code"));
        assert_ne!(failed, skipped);
    }

    #[test]
    fn test_intro_selected_by_keyword() {
        let formation = compose_tweet("Best FORMATION guide", None, &CodeOutcome::NotTacticsVideo);
        let tactic = compose_tweet("Custom tactics guide", None, &CodeOutcome::NotTacticsVideo);
        let generic = compose_tweet("Skill moves", None, &CodeOutcome::NotTacticsVideo);
        assert!(formation.starts_with("Fresh formation breakdown:"));
        assert!(tactic.starts_with("New custom tactics just dropped:"));
        assert!(generic.starts_with("Worth a watch:"));
    }
}
