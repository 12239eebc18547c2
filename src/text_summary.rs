//! Text card builder for CLI output.
//!
//! Formats a fetched candidate as human-readable lines for text mode.

use crate::model::Candidate;

/// Pre-formatted lines for text output.
pub(crate) struct TextSummary {
    pub lines: Vec<String>,
}

/// Build a text card for one candidate. Absent optional attributes are
/// skipped rather than rendered as placeholders.
pub(crate) fn build_candidate_card(candidate: &Candidate) -> TextSummary {
    let mut lines = Vec::new();

    lines.push(format!("{} (#{})", candidate.login, candidate.id));
    if let Some(name) = candidate.name.as_deref() {
        lines.push(format!("Name:     {name}"));
    }
    if let Some(location) = candidate.location.as_deref() {
        lines.push(format!("Location: {location}"));
    }
    if let Some(email) = candidate.email.as_deref() {
        lines.push(format!("Email:    {email}"));
    }
    if let Some(company) = candidate.company.as_deref() {
        lines.push(format!("Company:  {company}"));
    }
    if let Some(bio) = candidate.bio.as_deref() {
        lines.push(format!("Bio:      {bio}"));
    }
    lines.push(format!("Profile:  {}", candidate.html_url));

    TextSummary { lines }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_skips_absent_fields() {
        let candidate = Candidate {
            id: 7,
            login: "octocat".into(),
            name: None,
            avatar_url: "https://avatars.example/u/7".into(),
            location: Some("Berlin".into()),
            email: None,
            company: None,
            bio: None,
            html_url: "https://github.com/octocat".into(),
        };
        let card = build_candidate_card(&candidate);
        assert_eq!(card.lines[0], "octocat (#7)");
        assert!(card.lines.iter().any(|l| l.contains("Berlin")));
        assert!(!card.lines.iter().any(|l| l.starts_with("Email:")));
    }
}
