//! Prompt templates for the research and drafting stages

use crate::results::Finding;
use crate::search::SearchResult;
use std::fmt::Write;

/// Enumerate search results as a plain-text context block
pub fn format_search_context(results: &[SearchResult]) -> String {
    let mut context = String::from("Search results:\n\n");
    for (i, result) in results.iter().enumerate() {
        let _ = write!(
            context,
            "Result {}:\nTitle: {}\nURL: {}\nContent: {}\n\n",
            i + 1,
            result.title.as_deref().unwrap_or("No title"),
            result.url.as_deref().unwrap_or("No URL"),
            result.content.as_deref().unwrap_or("No content"),
        );
    }
    context
}

/// Prompt asking for a `{"findings": [...]}` object
pub fn research_prompt(query: &str, results: &[SearchResult]) -> String {
    format!(
        r#"You are a research expert. Using the search results below about "{query}", produce a thorough list of key findings.

Return a JSON object with a single key "findings" holding an array. Every element must look like this:

{{
    "content": "The detailed information and explanation of the finding",
    "source_url": "The URL where this information was found",
    "source_title": "The title of the source page"
}}

{context}
Respond with ONLY the JSON object containing the "findings" array."#,
        query = query,
        context = format_search_context(results),
    )
}

/// Render findings as numbered blocks
pub fn format_findings(findings: &[Finding]) -> String {
    let mut text = String::new();
    for (i, finding) in findings.iter().enumerate() {
        let _ = write!(
            text,
            "Finding {}:\nTitle: {}\nContent: {}\nSource URL: {}\nSource Title: {}\n\n",
            i + 1,
            finding.title,
            finding.content,
            finding.source_url,
            finding.source_title,
        );
    }
    text
}

/// Prompt asking for a cited Markdown answer
pub fn drafting_prompt(query: &str, findings: &[Finding]) -> String {
    format!(
        r#"You are an expert writer who turns research findings into complete, well-structured answers.
Analyse the findings below and write a coherent answer to the original query. The answer should:
1. Be organised with clear sections and headers
2. Combine information from several sources
3. Cite its sources
4. Put factual accuracy first
5. Be thorough yet concise
6. Use Markdown formatting

Answer the original query using only the findings provided.

Original Query: {query}

Research Findings:
{findings}
Write the answer now, formatted as Markdown."#,
        query = query,
        findings = format_findings(findings),
    )
}
