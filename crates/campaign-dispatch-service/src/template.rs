//! 消息个性化
//!
//! 消息模板唯一支持的占位符是字面量 `{{name}}`，
//! 替换为客户显示名，所有出现处都会替换。

/// 姓名占位符
pub const NAME_PLACEHOLDER: &str = "{{name}}";

/// 渲染个性化消息
pub fn personalize(template: &str, name: &str) -> String {
    template.replace(NAME_PLACEHOLDER, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_placeholder() {
        assert_eq!(personalize("Hi {{name}}, offer!", "Jane"), "Hi Jane, offer!");
    }

    #[test]
    fn test_replaces_all_occurrences() {
        assert_eq!(
            personalize("{{name}}, this one is for {{name}} only", "Ravi"),
            "Ravi, this one is for Ravi only"
        );
    }

    #[test]
    fn test_no_placeholder_returns_template_unchanged() {
        assert_eq!(personalize("静态消息", "Jane"), "静态消息");
    }

    #[test]
    fn test_unknown_placeholder_left_as_is() {
        assert_eq!(personalize("Hi {{email}}", "Jane"), "Hi {{email}}");
    }
}
