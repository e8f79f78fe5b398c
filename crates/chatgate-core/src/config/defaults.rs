pub(super) fn default_true() -> bool {
    true
}

pub(super) fn default_name() -> String {
    "chatgate".to_string()
}

pub(super) fn default_log_level() -> String {
    "info".to_string()
}

pub(super) fn default_provider() -> String {
    "gemini".to_string()
}

pub(super) fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

pub(super) fn default_history_window() -> usize {
    5
}
