//! Built-in tool catalog

use super::ToolDefinition;

/// Number of built-in tools.
pub const BUILTIN_COUNT: usize = 8;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Build a definition from string slices
fn define(
    name: &str,
    display_name: &str,
    binary_names: &[&str],
    config_directory: &str,
    sync_paths: &[&str],
    ignore_patterns: &[&str],
    env_vars: &[&str],
) -> ToolDefinition {
    ToolDefinition {
        name: name.to_string(),
        display_name: display_name.to_string(),
        binary_names: strings(binary_names),
        config_directory: config_directory.to_string(),
        sync_paths: strings(sync_paths),
        ignore_patterns: strings(ignore_patterns),
        env_vars: strings(env_vars),
    }
}

/// Returns all built-in tool definitions.
#[must_use]
pub fn builtin_definitions() -> Vec<ToolDefinition> {
    vec![
        define(
            "claude",
            "Claude Code",
            &["claude"],
            "~/.claude",
            &["CLAUDE.md", "settings.json"],
            &[
                "projects/",
                "cache/",
                "*.log",
                "credentials.json",
                ".git/",
                "**/.git/**",
                "commands/",
                "todos/",
                "debug/",
                "statsig/",
                "telemetry/",
            ],
            &["CLAUDE_HOME", "ANTHROPIC_API_KEY"],
        ),
        define(
            "cursor",
            "Cursor",
            &["cursor"],
            "~/.cursor",
            &["settings.json", "keybindings.json", "rules/", "mcp.json"],
            &[
                "cache/",
                "logs/",
                "*.log",
                ".git/",
                "**/.git/**",
                "CachedData/",
                "CachedExtensions/",
                "CachedExtensionVSIXs/",
                "Code Cache/",
                "GPUCache/",
                "User/workspaceStorage/",
                "User/globalStorage/",
                "User/History/",
                "blob_storage/",
                "databases/",
                "Session Storage/",
                "Local Storage/",
            ],
            &["CURSOR_HOME"],
        ),
        define(
            "windsurf",
            "Windsurf",
            &["windsurf"],
            "~/.windsurf",
            &["settings.json", "keybindings.json", "rules/", "cascade.json"],
            &[
                "cache/",
                "logs/",
                "*.log",
                ".git/",
                "**/.git/**",
                "CachedData/",
                "CachedExtensions/",
                "Code Cache/",
                "GPUCache/",
                "User/workspaceStorage/",
                "User/globalStorage/",
                "User/History/",
                "Session Storage/",
                "Local Storage/",
            ],
            &["WINDSURF_HOME"],
        ),
        define(
            "kiro",
            "Kiro CLI",
            &["kiro", "kiro-cli"],
            "~/.kiro",
            &[
                "settings/",
                "steering/",
                "agents/",
                "powers/installed/",
                "powers/registry.json",
            ],
            &[
                "kiro-auth-token.json",
                "cache/",
                "logs/",
                "*.log",
                ".git/",
                "**/.git/**",
                "**/repos/**",
                "**/native-binary/**",
                "**/*.node",
                "**/node_modules/**",
            ],
            &["KIRO_HOME", "KIRO_SESSION"],
        ),
        define(
            "gemini",
            "Gemini CLI",
            &["gemini", "gemini-cli"],
            "~/.gemini",
            &["GEMINI.md", "settings.json"],
            &[
                "oauth_creds.json",
                "cache/",
                "*.log",
                ".git/",
                "**/.git/**",
                "antigravity/",
                "update_available.txt",
            ],
            &["GEMINI_HOME"],
        ),
        define(
            "cody",
            "Sourcegraph Cody",
            &["cody"],
            "~/.sourcegraph",
            &["settings.json", "cody.json"],
            &[
                "cache/",
                "logs/",
                "*.log",
                ".git/",
                "**/.git/**",
                "embeddings/",
                "tokens.json",
                "auth.json",
            ],
            &["SRC_ACCESS_TOKEN", "SRC_ENDPOINT"],
        ),
        define(
            "continue",
            "Continue",
            &["continue"],
            "~/.continue",
            &["config.json", "config.yaml", "prompts/", ".continuerules"],
            &[
                "cache/",
                "logs/",
                "*.log",
                ".git/",
                "**/.git/**",
                "sessions/",
                "index/",
                "dev_data/",
                "types/",
            ],
            &["CONTINUE_HOME"],
        ),
        define(
            "opencode",
            "OpenCode",
            &["opencode", "oc"],
            "~/.config/opencode",
            &["skills/", "config.json", "settings.json"],
            &["cache/", "logs/", "*.log", ".git/", "**/.git/**"],
            &["OPENCODE_HOME", "OPENCODE_SESSION"],
        ),
    ]
}
