#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Zh,
    En,
}

impl Language {
    /// Two-letter code stored in the pointer file
    pub fn code(self) -> &'static str {
        match self {
            Language::Zh => "zh",
            Language::En => "en",
        }
    }

    /// Parse a stored code. Unknown codes are rejected so the caller can keep
    /// its default instead.
    pub fn from_code(code: &str) -> Option<Language> {
        let code = code.trim();
        if code.eq_ignore_ascii_case("zh") {
            Some(Language::Zh)
        } else if code.eq_ignore_ascii_case("en") {
            Some(Language::En)
        } else {
            None
        }
    }

    pub fn toggle(self) -> Language {
        match self {
            Language::Zh => Language::En,
            Language::En => Language::Zh,
        }
    }

    /// Native name shown in the settings tab
    pub fn label(self) -> &'static str {
        match self {
            Language::Zh => "简体中文",
            Language::En => "English",
        }
    }

    pub fn messages(self) -> &'static Messages {
        match self {
            Language::Zh => &ZH,
            Language::En => &EN,
        }
    }

    /// Startup default taken from the system locale
    pub fn detect() -> Language {
        match sys_locale::get_locale() {
            Some(locale) if locale.to_ascii_lowercase().starts_with("zh") => Language::Zh,
            _ => Language::En,
        }
    }
}

/// Every user-visible string. One struct for both languages, so a missing
/// translation is a compile error rather than a runtime fallback.
pub struct Messages {
    pub title: &'static str,
    pub tab_shortcuts: &'static str,
    pub tab_settings: &'static str,
    pub tab_help: &'static str,

    pub empty_list: &'static str,
    pub status_title: &'static str,
    pub info_label: &'static str,
    pub target_label: &'static str,
    pub marked_label: &'static str,
    pub entries_label: &'static str,

    pub language_label: &'static str,
    pub auto_select_label: &'static str,
    pub data_file_label: &'static str,
    pub on_label: &'static str,
    pub off_label: &'static str,

    pub settings_keys_title: &'static str,
    pub hint_language: &'static str,
    pub hint_auto_select: &'static str,
    pub hint_set_path: &'static str,
    pub hint_open_folder: &'static str,

    pub prompt_add_path: &'static str,
    pub prompt_data_file: &'static str,
    pub prompt_hint: &'static str,

    pub added: &'static str,
    pub deleted: &'static str,
    pub reloaded: &'static str,
    pub copied: &'static str,
    pub copy_failed: &'static str,
    pub save_failed: &'static str,
    pub nothing_added: &'static str,

    pub key_line: &'static str,
    pub guide_intro: &'static [&'static str],
    pub guide_keys: &'static [(&'static str, &'static str)],
}

pub(crate) const ZH: Messages = Messages {
    title: "Quick Start - 快速启动",
    tab_shortcuts: "快捷方式",
    tab_settings: "设置",
    tab_help: "帮助",

    empty_list: "列表为空：把文件拖到终端窗口即可添加，或按 i 输入路径",
    status_title: "状态",
    info_label: "信息",
    target_label: "目标",
    marked_label: "已标记",
    entries_label: "条目数",

    language_label: "界面语言",
    auto_select_label: "启动时默认全选",
    data_file_label: "存档位置",
    on_label: "开",
    off_label: "关",

    settings_keys_title: "快捷键",
    hint_language: "切换语言 (Language)",
    hint_auto_select: "启动时默认全选",
    hint_set_path: "设置存档位置…",
    hint_open_folder: "打开存档文件夹",

    prompt_add_path: "添加路径",
    prompt_data_file: "设置存档位置 (JSON 文件路径)",
    prompt_hint: "Enter 确认 · Esc 取消",

    added: "已添加",
    deleted: "已删除",
    reloaded: "已重新载入",
    copied: "已复制",
    copy_failed: "复制失败",
    save_failed: "保存失败",
    nothing_added: "没有可添加的路径",

    key_line: "Enter 启动 · Space 标记 · d 删除 · ? 帮助 · q 退出",
    guide_intro: &["🚀 快捷操作：", ""],
    guide_keys: &[
        ("拖入 / i", "添加：把文件拖到终端窗口，或输入路径"),
        ("Shift+↑/↓", "排序：上下移动所选条目 (J/K 亦可)"),
        ("Enter", "启动已标记条目（或光标所在条目）"),
        ("Delete / d", "删除已标记条目"),
        ("Space", "标记 / 取消标记"),
        ("Ctrl+A / Esc", "全选 / 取消全部标记"),
        ("y", "复制目标路径"),
        ("r", "从磁盘重新载入"),
        ("l / a", "切换语言 / 启动时默认全选"),
        ("s / o", "设置存档位置 / 打开存档文件夹"),
        ("Tab / ?", "切换标签页 / 显示本指南"),
        ("q", "退出"),
    ],
};

pub(crate) const EN: Messages = Messages {
    title: "Quick Start",
    tab_shortcuts: "Shortcuts",
    tab_settings: "Settings",
    tab_help: "Help",

    empty_list: "Empty. Drop files onto the terminal to add them, or press i to type a path",
    status_title: "Status",
    info_label: "Info",
    target_label: "Target",
    marked_label: "Marked",
    entries_label: "Entries",

    language_label: "Language",
    auto_select_label: "Auto-select on start",
    data_file_label: "Storage path",
    on_label: "on",
    off_label: "off",

    settings_keys_title: "Keys",
    hint_language: "Switch language (中文)",
    hint_auto_select: "Auto-select on start",
    hint_set_path: "Set storage path…",
    hint_open_folder: "Open storage folder",

    prompt_add_path: "Add a path",
    prompt_data_file: "Set storage path (JSON file)",
    prompt_hint: "Enter to confirm · Esc to cancel",

    added: "Added",
    deleted: "Deleted",
    reloaded: "Reloaded",
    copied: "Copied",
    copy_failed: "Copy failed",
    save_failed: "Save failed",
    nothing_added: "Nothing to add (paths must exist)",

    key_line: "Enter launch · Space mark · d delete · ? help · q quit",
    guide_intro: &["🚀 Quick actions:", ""],
    guide_keys: &[
        ("drop / i", "Add: drag files onto the terminal, or type a path"),
        ("Shift+↑/↓", "Sort: move the selected row (J/K also work)"),
        ("Enter", "Launch the marked rows (or the cursor row)"),
        ("Delete / d", "Remove the marked rows"),
        ("Space", "Mark / unmark"),
        ("Ctrl+A / Esc", "Mark all / clear marks"),
        ("y", "Copy the target path"),
        ("r", "Reload the list from disk"),
        ("l / a", "Language / auto-select on start"),
        ("s / o", "Set storage path / open its folder"),
        ("Tab / ?", "Switch tabs / show this guide"),
        ("q", "Quit"),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for lang in [Language::Zh, Language::En] {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
    }

    #[test]
    fn from_code_tolerates_case_and_whitespace() {
        assert_eq!(Language::from_code(" ZH "), Some(Language::Zh));
        assert_eq!(Language::from_code("En"), Some(Language::En));
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(Language::from_code(""), None);
    }

    #[test]
    fn toggle_flips_between_the_two() {
        assert_eq!(Language::Zh.toggle(), Language::En);
        assert_eq!(Language::En.toggle(), Language::Zh);
        assert_eq!(Language::En.toggle().toggle(), Language::En);
    }
}
