//! Context assembly and prompt template for the generative backend

use crate::types::ScoredChunk;

const SYSTEM_PROMPT: &str = "\
You are an FAQ assistant for ARV Digital Services.
You MUST answer using ONLY the information in the provided CONTEXT.
If the CONTEXT does not contain enough information, say you do not have enough information in the knowledge base and suggest contacting support.
Do NOT guess. Do NOT add anything beyond the CONTEXT.
Language: English.
Tone: professional and friendly.
Keep the answer short and actionable (max 6 sentences).
At the end, add a line: 'Sources: <comma-separated filenames>' using the sources present in CONTEXT.
";

/// Concatenate chunks into a source-tagged context, capped at
/// `max_chars_total` characters. Chunks that would overflow the budget are
/// dropped, keeping whole blocks only.
pub fn format_context(chunks: &[ScoredChunk], max_chars_total: usize) -> String {
    let mut blocks = Vec::new();
    let mut used = 0usize;

    for chunk in chunks {
        let block = format!("[SOURCE: {}]\n{}\n", chunk.source(), chunk.text());
        if used + block.len() > max_chars_total {
            break;
        }
        used += block.len();
        blocks.push(block);
    }

    blocks.join("\n---\n")
}

/// Build the single-turn prompt sent to the generative backend.
pub fn build_prompt(question: &str, context: &str) -> String {
    format!("{SYSTEM_PROMPT}\nQUESTION: {question}\n\nCONTEXT:\n{context}")
}
