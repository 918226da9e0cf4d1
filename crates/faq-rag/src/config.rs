//! Configuration for the FAQ answering pipeline

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Fixed fallback answer for out-of-scope or insufficiently supported questions.
pub const FALLBACK_MESSAGE: &str = "Sorry — I don’t have that information in my FAQ knowledge base. Please rephrase your question or contact support.";

/// Main pipeline configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RagConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Knowledge base locations
    #[serde(default)]
    pub knowledge_base: KnowledgeBaseConfig,
    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,
    /// Embedding configuration
    #[serde(default)]
    pub embeddings: EmbeddingConfig,
    /// Retrieval and gating configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    /// Ollama/LLM configuration
    #[serde(default)]
    pub llm: LlmConfig,
}

impl RagConfig {
    /// Load configuration: optional TOML file, then environment overrides.
    ///
    /// The file path comes from `FAQ_RAG_CONFIG`, falling back to
    /// `faq-rag.toml` in the working directory when present.
    pub fn load() -> Result<Self> {
        let path = std::env::var("FAQ_RAG_CONFIG")
            .map(PathBuf::from)
            .ok()
            .or_else(|| {
                let default = PathBuf::from("faq-rag.toml");
                default.exists().then_some(default)
            });

        let mut config = match path {
            Some(p) => Self::from_file(&p)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("invalid config file {}: {}", path.display(), e)))
    }

    /// Apply environment-variable overrides for the tunable thresholds.
    fn apply_env_overrides(&mut self) {
        if let Some(top_k) = env_parse::<usize>("TOP_K") {
            self.retrieval.top_k = top_k;
        }
        if let Some(threshold) = env_parse::<f32>("SIM_THRESHOLD") {
            self.retrieval.similarity_threshold = threshold;
        }
        if let Some(threshold) = env_parse::<f32>("LEX_THRESHOLD") {
            self.retrieval.lexical_threshold = threshold;
        }
        if let Ok(dir) = std::env::var("KB_DIR") {
            self.knowledge_base.kb_dir = PathBuf::from(dir);
        }
        if let Ok(model) = std::env::var("OLLAMA_MODEL") {
            self.llm.generate_model = model;
        }
        if let Ok(url) = std::env::var("OLLAMA_URL") {
            self.llm.base_url = url;
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_cors: true,
        }
    }
}

/// Knowledge base locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeBaseConfig {
    /// Directory of source markdown documents
    pub kb_dir: PathBuf,
    /// Directory for the persisted index artifacts
    pub cache_dir: PathBuf,
    /// Optional path to a FAQ catalog file (compiled-in default otherwise)
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

impl KnowledgeBaseConfig {
    /// Path of the persisted vector index
    pub fn index_path(&self) -> PathBuf {
        self.cache_dir.join("kb.index.json")
    }

    /// Path of the persisted chunk metadata
    pub fn chunks_path(&self) -> PathBuf {
        self.cache_dir.join("kb.chunks.json")
    }
}

impl Default for KnowledgeBaseConfig {
    fn default() -> Self {
        Self {
            kb_dir: PathBuf::from("knowledge_base"),
            cache_dir: PathBuf::from(".cache"),
            catalog_path: None,
        }
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum chunk size in characters
    pub max_chars: usize,
    /// Overlap between adjacent chunks in characters
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chars: 800,
            overlap: 140,
        }
    }
}

/// Embedding backend selection
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    /// Deterministic local hashed bag-of-tokens embedder
    #[default]
    Hashed,
    /// Ollama embedding endpoint
    Ollama,
}

/// Embedding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Which embedding provider to use
    #[serde(default)]
    pub backend: EmbeddingBackend,
    /// Embedding dimensions
    pub dimensions: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            backend: EmbeddingBackend::Hashed,
            dimensions: 384,
        }
    }
}

/// Retrieval and gating configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Number of chunks to retrieve
    pub top_k: usize,
    /// Minimum best similarity for answering (inner product on unit vectors)
    pub similarity_threshold: f32,
    /// Minimum lexical overlap ratio for Latin-script questions
    pub lexical_threshold: f32,
    /// Character budget for the generative context
    pub context_budget: usize,
    /// Line cap for extractive answers
    pub max_answer_lines: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 4,
            similarity_threshold: 0.40,
            lexical_threshold: 0.03,
            context_budget: 2400,
            max_answer_lines: 5,
        }
    }
}

/// LLM (Ollama) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Ollama base URL
    pub base_url: String,
    /// Embedding model name (used when the ollama embedding backend is selected)
    pub embed_model: String,
    /// Generation model name; empty disables generative answering
    pub generate_model: String,
    /// Temperature for generation
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Number of retries for failed requests
    pub max_retries: u32,
}

impl LlmConfig {
    /// Whether a generative backend is configured
    pub fn generation_enabled(&self) -> bool {
        !self.generate_model.trim().is_empty()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            embed_model: "nomic-embed-text".to_string(),
            generate_model: String::new(),
            temperature: 0.0,
            timeout_secs: 60,
            max_retries: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_thresholds() {
        let config = RagConfig::default();
        assert_eq!(config.retrieval.top_k, 4);
        assert!((config.retrieval.similarity_threshold - 0.40).abs() < f32::EPSILON);
        assert!((config.retrieval.lexical_threshold - 0.03).abs() < f32::EPSILON);
        assert_eq!(config.chunking.max_chars, 800);
        assert_eq!(config.chunking.overlap, 140);
        assert!(!config.llm.generation_enabled());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: RagConfig = toml::from_str(
            r#"
            [retrieval]
            top_k = 6
            similarity_threshold = 0.5
            lexical_threshold = 0.1
            context_budget = 2000
            max_answer_lines = 3

            [llm]
            base_url = "http://localhost:11434"
            embed_model = "nomic-embed-text"
            generate_model = "phi3"
            temperature = 0.2
            timeout_secs = 30
            max_retries = 1
            "#,
        )
        .expect("valid toml");

        assert_eq!(config.retrieval.top_k, 6);
        assert!(config.llm.generation_enabled());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.embeddings.backend, EmbeddingBackend::Hashed);
    }
}
