//! User-facing banners for config validation results
//!
//! Formatting is a pure function of the loader's issue list so it can be
//! tested without touching the filesystem or the process environment.

use vigil_core::ValidationIssue;

const RULE: &str = "*************************************************************";
const DOCS_URL: &str = "https://vigil-nvr.github.io/docs/configuration";

/// Frame a line of text inside the banner box.
fn framed(text: &str) -> String {
    format!("***    {text:<51}***")
}

/// The banner printed when the config file fails validation.
///
/// One `<dotted.location>: <message>` line per issue, in loader order.
pub fn invalid_banner(issues: &[ValidationIssue]) -> String {
    let mut lines = vec![
        RULE.to_string(),
        RULE.to_string(),
        framed("Your config file is not valid!"),
        framed("Please check the docs at"),
        framed(DOCS_URL),
        RULE.to_string(),
        RULE.to_string(),
        framed("Config Validation Errors"),
        RULE.to_string(),
    ];

    for issue in issues {
        lines.push(issue.to_string());
    }

    lines.push(RULE.to_string());
    lines.push(framed("End Config Validation Errors"));
    lines.push(RULE.to_string());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// The banner printed on a successful validate-only run.
pub fn valid_banner() -> String {
    format!("{}\n{}\n{}\n", RULE, framed("Your config file is valid."), RULE)
}
