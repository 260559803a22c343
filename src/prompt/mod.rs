// SPDX-License-Identifier: MIT
//! Persona prompt builder.
//!
//! Every user action becomes a single natural-language instruction string.
//! The instruction pins the model to fixed markdown section headers
//! (`### Critical Issues`, `### High Priority`, ...) so the response shaper
//! can count severities afterwards. That header contract is the only thing
//! tying the prompt and the parser together; if the model ignores it the
//! shaper reports zeros.

use serde::{Deserialize, Serialize};

/// Phrase substituted when the caller supplies no focus areas.
pub const DEFAULT_FOCUS: &str = "general improvements";

// ─── Action ──────────────────────────────────────────────────────────────────

/// What the user asked the model to do with the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReviewAction {
    Review,
    Rewrite,
    Generate,
    Tests,
    Docs,
    SecurityScan,
    Refactor,
}

impl ReviewAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewAction::Review => "review",
            ReviewAction::Rewrite => "rewrite",
            ReviewAction::Generate => "generate",
            ReviewAction::Tests => "tests",
            ReviewAction::Docs => "docs",
            ReviewAction::SecurityScan => "security-scan",
            ReviewAction::Refactor => "refactor",
        }
    }

    /// Whether the response is expected to carry a rewritten/generated
    /// code block that the shaper should extract.
    pub fn produces_code(&self) -> bool {
        matches!(
            self,
            ReviewAction::Rewrite
                | ReviewAction::Generate
                | ReviewAction::Tests
                | ReviewAction::Refactor
        )
    }
}

// ─── Persona ─────────────────────────────────────────────────────────────────

/// Role persona selected by the user; changes the framing text only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    Developer,
    Student,
    Organisation,
    Enterprise,
}

impl Persona {
    /// Unknown or missing strings fall back to Developer.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "student" => Persona::Student,
            "organisation" | "organization" => Persona::Organisation,
            "enterprise" => Persona::Enterprise,
            _ => Persona::Developer,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::Developer => "developer",
            Persona::Student => "student",
            Persona::Organisation => "organisation",
            Persona::Enterprise => "enterprise",
        }
    }

    /// Persona framing for analysis-style actions.
    fn review_framing(&self, policy_context: &str) -> String {
        match self {
            Persona::Student => "an AI Programming Tutor. Explain mistakes simply, \
                 give hints, acknowledge what was done well, and show corrected code."
                .to_string(),
            Persona::Enterprise => format!(
                "a Senior Security Auditor. Audit this code against the following \
                 policies: {policy_context}. Focus on the OWASP Top 10 and compliance."
            ),
            Persona::Organisation => "a Team Architect. Focus on maintainability, \
                 coding standards, and large-scale consistency."
                .to_string(),
            Persona::Developer => "a Senior Full-Stack Developer. Focus on performance, \
                 logic bugs, and production-ready optimizations."
                .to_string(),
        }
    }

    /// Persona framing for rewrite-style actions.
    fn rewrite_framing(&self) -> &'static str {
        match self {
            Persona::Student => {
                "an AI Programming Tutor. Rewrite this code to fix errors and \
                 improve it, explaining the changes clearly."
            }
            Persona::Enterprise => {
                "a Senior Security Auditor. Rewrite this code to patch security \
                 vulnerabilities and adhere to best practices."
            }
            Persona::Organisation => {
                "a Team Architect. Refactor this code for better maintainability, \
                 scalability, and adherence to architectural patterns."
            }
            Persona::Developer => {
                "a Senior Full-Stack Developer. Optimize this code for performance, \
                 readability, and correctness."
            }
        }
    }
}

// ─── PromptBuilder ───────────────────────────────────────────────────────────

/// Inputs for one instruction string.
pub struct PromptBuilder<'a> {
    pub action: ReviewAction,
    pub persona: Persona,
    pub language: &'a str,
    /// Source code, or the user's natural-language prompt for Generate.
    pub input: &'a str,
    pub focus_areas: &'a [String],
    /// Retrieved policy chunks for enterprise/organisation personas.
    pub policy_context: &'a str,
}

impl PromptBuilder<'_> {
    /// Render the focus list, substituting the default phrase for an empty
    /// list so the prompt never shows an empty enumeration.
    fn focus(&self) -> String {
        if self.focus_areas.is_empty() {
            DEFAULT_FOCUS.to_string()
        } else {
            self.focus_areas.join(", ")
        }
    }

    /// The fixed header scaffold the shaper counts against.
    const SEVERITY_SECTIONS: &'static str = "\
## Overall Assessment
[Brief summary]

### Critical Issues
[If any]

### High Priority
[If any]

### Medium Priority
[If any]

### Low Priority
[If any]";

    pub fn build(&self) -> String {
        let focus = self.focus();
        let language = self.language;
        let input = self.input;

        match self.action {
            ReviewAction::Review => format!(
                "Act as {persona}.\n\
                 Analyze this {language} code focusing on: {focus}.\n\n\
                 RESPONSE FORMAT:\n{sections}\n\nCODE:\n{input}\n",
                persona = self.persona.review_framing(self.policy_context),
                sections = Self::SEVERITY_SECTIONS,
            ),
            ReviewAction::SecurityScan => format!(
                "Act as {persona}.\n\
                 Perform a security scan of this {language} code focusing on: {focus}. \
                 Report only genuine vulnerabilities.\n\n\
                 RESPONSE FORMAT:\n{sections}\n\nCODE:\n{input}\n",
                persona = self.persona.review_framing(self.policy_context),
                sections = Self::SEVERITY_SECTIONS,
            ),
            ReviewAction::Docs => format!(
                "Act as {persona}.\n\
                 Write documentation for this {language} code focusing on: {focus}. \
                 Summarize intent, inputs, outputs, and caveats in markdown.\n\n\
                 CODE:\n{input}\n",
                persona = self.persona.review_framing(self.policy_context),
            ),
            ReviewAction::Rewrite | ReviewAction::Refactor => format!(
                "Act as {persona}.\n\
                 Rewrite and refactor the following {language} code, focusing on: {focus}.\n\n\
                 Provide your response in this EXACT format:\n\
                 ## Review of Changes\n\
                 [Brief summary of what you fixed or improved.]\n\n\
                 ### Issues Addressed\n\
                 - [Change 1]\n\
                 - [Change 2]\n\n\
                 ## Rewritten Code\n\
                 ```{language}\n\
                 [Your rewritten and corrected code here]\n\
                 ```\n\n\
                 ORIGINAL CODE:\n{input}\n",
                persona = self.persona.rewrite_framing(),
            ),
            ReviewAction::Tests => format!(
                "Act as {persona}.\n\
                 Write a unit test suite for the following {language} code, \
                 focusing on: {focus}. Cover the happy path and edge cases.\n\n\
                 Provide your response in this EXACT format:\n\
                 ## Test Plan\n\
                 [What the suite covers.]\n\n\
                 ## Rewritten Code\n\
                 ```{language}\n\
                 [The complete test file here]\n\
                 ```\n\n\
                 CODE UNDER TEST:\n{input}\n",
                persona = self.persona.review_framing(self.policy_context),
            ),
            ReviewAction::Generate => format!(
                "Act as {persona}.\n\
                 Write {language} code for the following request. Respond with a \
                 single fenced code block and no prose outside it.\n\n\
                 REQUEST:\n{input}\n",
                persona = self.persona.rewrite_framing(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder<'a>(action: ReviewAction, focus: &'a [String]) -> PromptBuilder<'a> {
        PromptBuilder {
            action,
            persona: Persona::Developer,
            language: "python",
            input: "print(1)",
            focus_areas: focus,
            policy_context: "",
        }
    }

    #[test]
    fn empty_focus_list_uses_fallback_phrase() {
        let prompt = builder(ReviewAction::Review, &[]).build();
        assert!(prompt.contains(DEFAULT_FOCUS));
        assert!(!prompt.contains("focusing on: ."));
    }

    #[test]
    fn focus_areas_are_comma_joined() {
        let focus = vec!["security".to_string(), "performance".to_string()];
        let prompt = builder(ReviewAction::Review, &focus).build();
        assert!(prompt.contains("security, performance"));
    }

    #[test]
    fn review_prompt_pins_severity_headers() {
        let prompt = builder(ReviewAction::Review, &[]).build();
        for header in [
            "### Critical Issues",
            "### High Priority",
            "### Medium Priority",
            "### Low Priority",
        ] {
            assert!(prompt.contains(header), "missing header {header}");
        }
    }

    #[test]
    fn rewrite_prompt_pins_code_section() {
        let prompt = builder(ReviewAction::Rewrite, &[]).build();
        assert!(prompt.contains("## Rewritten Code"));
        assert!(prompt.contains("```python"));
    }

    #[test]
    fn enterprise_framing_carries_policy_context() {
        let prompt = PromptBuilder {
            action: ReviewAction::Review,
            persona: Persona::Enterprise,
            language: "go",
            input: "package main",
            focus_areas: &[],
            policy_context: "All secrets live in the vault.",
        }
        .build();
        assert!(prompt.contains("All secrets live in the vault."));
        assert!(prompt.contains("OWASP"));
    }

    #[test]
    fn unknown_persona_string_falls_back_to_developer() {
        assert_eq!(Persona::parse("wizard"), Persona::Developer);
        assert_eq!(Persona::parse("ENTERPRISE"), Persona::Enterprise);
        assert_eq!(Persona::parse("organization"), Persona::Organisation);
    }

    #[test]
    fn code_bearing_actions() {
        assert!(ReviewAction::Rewrite.produces_code());
        assert!(ReviewAction::Generate.produces_code());
        assert!(!ReviewAction::Review.produces_code());
        assert!(!ReviewAction::Docs.produces_code());
    }
}
