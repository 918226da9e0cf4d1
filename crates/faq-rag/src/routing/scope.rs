//! Out-of-scope guard evaluated before routing or retrieval

// Obvious non-FAQ domains the knowledge base will never cover.
const OFF_DOMAIN: &[&str] = &[
    "bitcoin",
    "btc",
    "eth price",
    "price of bitcoin",
    "weather",
    "forecast",
    "temperature",
    "etf",
    "invest",
    "investment",
    "diagnose",
    "diagnosis",
    "medical advice",
    "headache",
    "stomach pain",
    "chest pain",
    "lawyer",
    "legal advice",
];

// Company contact/location details are not in the knowledge base.
const CONTACT_DETAILS: &[&str] = &[
    "phone number",
    "phone",
    "call you",
    "office address",
    "address",
    "location",
];

const LEGAL_TERMS: &[&str] = &[
    "terms & conditions",
    "terms and conditions",
    "t&c",
    "t & c",
];

const DRAFTING_VERBS: &[&str] = &["draft", "write", "generate", "template"];

const LEGAL_DOCUMENTS: &[&str] = &["contract", "agreement", "nda"];

/// Recognize question categories the knowledge base will never answer.
///
/// On a match the pipeline short-circuits to the fallback answer with zero
/// confidence; retrieval and routing are skipped entirely. The exceptions are
/// deliberate product decisions: asking to *sign* an NDA is in scope even
/// though legal topics generally are not, while asking to *draft* one is a
/// legal-document drafting request and is rejected; "payment terms" stays in
/// scope despite containing "terms".
pub fn is_out_of_scope(question: &str) -> bool {
    let q = question.trim().to_lowercase();
    if q.is_empty() {
        return true;
    }

    if OFF_DOMAIN.iter().any(|x| q.contains(x)) {
        return true;
    }

    if CONTACT_DETAILS.iter().any(|x| q.contains(x)) {
        return true;
    }

    if LEGAL_TERMS.iter().any(|x| q.contains(x)) {
        return true;
    }

    // Legal document drafting. Signing questions carry no drafting verb and
    // fall through to the router.
    if LEGAL_DOCUMENTS.iter().any(|d| q.contains(d))
        && DRAFTING_VERBS.iter().any(|v| q.contains(v))
    {
        return true;
    }

    // "terms" is ambiguous: out of scope only when it clearly refers to
    // drafting legal T&Cs rather than payment/pricing terms.
    if q.contains("terms")
        && ["draft", "write", "generate"].iter().any(|v| q.contains(v))
        && !q.contains("payment")
        && !q.contains("pricing")
    {
        return true;
    }

    false
}
