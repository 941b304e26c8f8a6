// Prompt constants for requirement extraction.

/// Role description; `JSON_ONLY_SYSTEM` is appended at call time.
pub const EXTRACT_SYSTEM: &str = "You are an expert technical recruiter. \
    You read job postings and extract structured hiring requirements.";

/// Replace `{title}`, `{company}` and `{description}` before sending.
pub const EXTRACT_PROMPT_TEMPLATE: &str = r#"Extract the hiring requirements from this job posting.

Title: {title}
Company: {company}

Description:
{description}

Return a JSON object with this EXACT schema (no extra fields):
{
  "required_skills": ["Python", "PostgreSQL"],
  "nice_to_have_skills": ["Kubernetes"],
  "experience_years_min": 3,
  "experience_years_max": null,
  "job_type": "permanent",
  "remote_type": "full",
  "eligible_regions": ["EU"],
  "visa_sponsorship": null
}

Rules:
- Skills are concrete technologies, tools or languages, one per entry, using their common name.
- "required_skills" are must-haves ("required", "must have", "you have"); everything phrased as
  "nice to have", "bonus", "plus" or "preferred" goes in "nice_to_have_skills".
- "job_type" is one of: permanent, contract, freelance, part-time.
- "remote_type" is one of: full, hybrid, onsite.
- "eligible_regions" lists countries or regions candidates must be located in. Use ["Worldwide"]
  only if the posting explicitly says anyone anywhere can apply.
- "visa_sponsorship" is true only if sponsorship is offered, false only if it is explicitly
  ruled out, otherwise null.
"#;
