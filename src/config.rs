use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        mongo_uri: get_env_or_default("MONGO_URI", "mongodb://localhost:27017"),
        mongo_db_name: get_env_or_default("MONGO_DB_NAME", "lookbook"),
        catalog_collection: get_env_or_default("CATALOG_COLLECTION", "products"),
        llm_api_key: get_env_opt("GROQ_API_KEY"),
        llm_model_name: get_env_or_default("LLM_MODEL_NAME", "llama-3.1-8b-instant"),
        llm_base_url: get_env_or_default("LLM_BASE_URL", "https://api.groq.com/openai/v1"),
        bind_addr: get_env_or_default("BIND_ADDR", "127.0.0.1:5000"),
        static_dir: get_env_or_default("STATIC_DIR", "static"),
        search_origin: get_env_or_default("SEARCH_ORIGIN", "http://127.0.0.1:5000"),
    }
});

pub struct Config {
    pub mongo_uri: String,
    pub mongo_db_name: String,
    pub catalog_collection: String,
    /// Bearer token for the chat completions endpoint. Only `serve` needs it.
    pub llm_api_key: Option<String>,
    pub llm_model_name: String,
    pub llm_base_url: String,
    pub bind_addr: String,
    pub static_dir: String,
    /// Origin the `search` command posts to.
    pub search_origin: String,
}

fn get_env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
