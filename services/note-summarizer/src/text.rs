//! Plain-text helpers for generated output

use std::sync::LazyLock;

use regex::Regex;

/// Example note for trying the tool out
pub const SAMPLE_NOTE: &str = "Patient: John Doe, 45M
Reason: Chest pain, mild SOB
History: HTN, smoker (10 pack-years)
Vitals: BP 145/90, HR 88, SpO2 98%
Exam: Lungs clear, regular rhythm, no murmurs. Mild tenderness chest wall.
Plan: EKG normal. Likely musculoskeletal. Rec NSAIDs. Follow up with PCP in 1 week. Stop smoking.";

static EMPHASIS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[#*`_]").unwrap());
static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.*?)\]\(.*?\)").unwrap());
static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s*[-+]\s+").unwrap());
static BLOCKQUOTE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s*>\s+").unwrap());
static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{2,}").unwrap());

/// Reduce markdown to text suitable for reading aloud or piping elsewhere
pub fn strip_markdown(text: &str) -> String {
    let text = EMPHASIS.replace_all(text, "");
    let text = LINK.replace_all(&text, "$1");
    let text = LIST_MARKER.replace_all(&text, "");
    let text = BLOCKQUOTE.replace_all(&text, "");
    BLANK_LINES.replace_all(&text, "\n").into_owned()
}
