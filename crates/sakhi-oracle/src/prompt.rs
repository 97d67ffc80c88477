//! Verification prompts for the language-model oracle

use sakhi_domain::ContentBody;

const VERIFICATION_INSTRUCTIONS: &str = r#"You are a fact-checker for a women's-awareness platform in India.
Judge whether the following editorial entry is accurate, non-misleading,
and appropriate for publication. Both language variants must agree in
meaning."#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Respond with ONLY a JSON object in this exact format, no other text:
{"is_verified": true or false, "verification_notes": "one or two sentences explaining the judgment"}"#;

/// Build the verification prompt for a piece of content
///
/// The prompt embeds every type-specific field in both language variants and
/// demands a strict JSON verdict.
pub fn build_prompt(content: &ContentBody) -> String {
    let mut prompt = String::new();

    prompt.push_str(VERIFICATION_INSTRUCTIONS);
    prompt.push_str("\n\n");

    match content {
        ContentBody::Law { title, description } => {
            prompt.push_str("Entry type: law\n\n");
            prompt.push_str("Title (en): ");
            prompt.push_str(&title.en);
            prompt.push_str("\nTitle (hi): ");
            prompt.push_str(&title.hi);
            prompt.push_str("\nDescription (en): ");
            prompt.push_str(&description.en);
            prompt.push_str("\nDescription (hi): ");
            prompt.push_str(&description.hi);
        }
        ContentBody::Scheme {
            name,
            eligibility,
            benefits,
        } => {
            prompt.push_str("Entry type: government scheme\n\n");
            prompt.push_str("Name (en): ");
            prompt.push_str(&name.en);
            prompt.push_str("\nName (hi): ");
            prompt.push_str(&name.hi);
            prompt.push_str("\nEligibility (en): ");
            prompt.push_str(&eligibility.en);
            prompt.push_str("\nEligibility (hi): ");
            prompt.push_str(&eligibility.hi);
            prompt.push_str("\nBenefits (en): ");
            prompt.push_str(&benefits.en);
            prompt.push_str("\nBenefits (hi): ");
            prompt.push_str(&benefits.hi);
        }
    }

    prompt.push_str("\n\n");
    prompt.push_str(OUTPUT_FORMAT_REMINDER);
    prompt
}
