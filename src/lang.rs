//! Locale-keyed message catalog for rendering violations.
//!
//! Templates use `{placeholder}` substitution. Rendering never fails: a
//! missing locale or key produces a fallback string containing the key so a
//! gap in the catalog cannot abort a validation pass.

use std::collections::HashMap;

/// Builtin English templates.
const EN: &[(&str, &str)] = &[
    ("required", "{name} cannot be empty"),
    ("eq", "{name} should be equal to {min}"),
    ("string.eq", "{name} should be exactly {min} chars long"),
    ("string.lt", "{name} should be less than {max} chars long"),
    ("string.lte", "{name} should be at most {max} chars long"),
    ("string.gt", "{name} should be more than {min} chars long"),
    ("string.gte", "{name} should be at least {min} chars long"),
    ("string.between", "{name} should be between {min} and {max} chars long"),
    ("number.eq", "{name} should be equal to {min}"),
    ("number.lt", "{name} should be less than {max}"),
    ("number.lte", "{name} should be at most {max}"),
    ("number.gt", "{name} should be more than {min}"),
    ("number.gte", "{name} should be at least {min}"),
    ("number.between", "{name} should be between {min} and {max}"),
    ("array.eq", "array {name} length should be exactly {min}"),
    ("array.lt", "array {name} length should be less than {max}"),
    ("array.lte", "array {name} length should be at most {max}"),
    ("array.gt", "array {name} length should be more than {min}"),
    ("array.gte", "array {name} length should be at least {min}"),
    ("array.between", "array {name} length should be between {min} and {max}"),
    ("in", "{value} is not in the allowed set: {set}"),
    ("in.empty", "{name} cannot be empty"),
    ("unique", "{name} contains duplicate elements"),
    ("email", "{value} is not a valid email address"),
    ("phone", "incorrect mobile phone number format ({value})"),
    ("number", "{value} is not numeric"),
    ("url", "{value} is not a valid url"),
    ("ip", "{value} is not a valid ip address"),
    ("ipv4", "{value} is not a valid ipv4 address"),
    ("ipv6", "{value} is not a valid ipv6 address"),
    ("datetime", "{value} does not match the datetime format {format}"),
    ("params.count", "rule `{rule}` expects {expected} parameter(s), got {got}"),
    ("params.parse", "parameter `{param}` of rule `{rule}` is not a valid {kind}"),
    ("rule_not_found", "validation rule `{rule}` does not exist"),
    ("struct_empty", "struct {record} is empty"),
    ("max_depth", "value nesting exceeds the maximum depth of {depth}"),
];

/// Builtin Chinese templates.
const ZH: &[(&str, &str)] = &[
    ("required", "{name}不能为空"),
    ("eq", "{name}必须等于{min}"),
    ("string.eq", "{name}长度必须等于{min}"),
    ("string.lt", "{name}长度必须小于{max}"),
    ("string.lte", "{name}长度不能大于{max}"),
    ("string.gt", "{name}长度必须大于{min}"),
    ("string.gte", "{name}长度不能小于{min}"),
    ("string.between", "{name}长度必须在{min}和{max}之间"),
    ("number.eq", "{name}必须等于{min}"),
    ("number.lt", "{name}必须小于{max}"),
    ("number.lte", "{name}不能大于{max}"),
    ("number.gt", "{name}必须大于{min}"),
    ("number.gte", "{name}不能小于{min}"),
    ("number.between", "{name}必须在{min}和{max}之间"),
    ("array.eq", "{name}的元素个数必须等于{min}"),
    ("array.lt", "{name}的元素个数必须小于{max}"),
    ("array.lte", "{name}的元素个数不能大于{max}"),
    ("array.gt", "{name}的元素个数必须大于{min}"),
    ("array.gte", "{name}的元素个数不能小于{min}"),
    ("array.between", "{name}的元素个数必须在{min}和{max}之间"),
    ("in", "{value}不在指定范围:{set}"),
    ("in.empty", "{name}不能为空"),
    ("unique", "{name}存在重复元素"),
    ("email", "非Email:{value}"),
    ("phone", "手机号码({value})不正确"),
    ("number", "非数字:{value}"),
    ("url", "Url格式不正确:{value}"),
    ("ip", "非IP:{value}"),
    ("ipv4", "非IPv4:{value}"),
    ("ipv6", "非IPv6:{value}"),
    ("datetime", "{value}不符合时间格式{format}"),
    ("params.count", "规则{rule}参数个数有误"),
    ("params.parse", "参数{param}与类型不匹配"),
    ("rule_not_found", "校验规则 {rule} 不存在"),
    ("struct_empty", "结构体{record}为空"),
    ("max_depth", "嵌套深度超过上限{depth}"),
];

/// Locale code → message key → template.
///
/// # Examples
///
/// ```rust
/// use sieve::lang::Catalog;
/// let catalog = Catalog::builtin();
/// let msg = catalog.render("en", "required", &[("name", "age".to_string())]);
/// assert_eq!(msg, "age cannot be empty");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tables: HashMap<String, HashMap<String, String>>,
}

impl Catalog {
    /// An empty catalog with no locales.
    pub fn new() -> Self {
        Self::default()
    }

    /// The builtin catalog with `en` and `zh` tables.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.install("en", EN);
        catalog.install("zh", ZH);
        catalog
    }

    fn install(&mut self, locale: &str, entries: &[(&str, &str)]) {
        for (key, template) in entries {
            self.insert(locale, *key, *template);
        }
    }

    /// Adds or replaces one template. New locales are created on first use.
    pub fn insert(
        &mut self,
        locale: impl Into<String>,
        key: impl Into<String>,
        template: impl Into<String>,
    ) {
        self.tables
            .entry(locale.into())
            .or_default()
            .insert(key.into(), template.into());
    }

    pub fn has(&self, locale: &str, key: &str) -> bool {
        self.tables
            .get(locale)
            .map_or(false, |table| table.contains_key(key))
    }

    /// Renders the template for `key` in `locale`, substituting every
    /// `{name}` placeholder present in `args`. A missing locale or key
    /// yields a fallback string containing the key.
    pub fn render(&self, locale: &str, key: &str, args: &[(&str, String)]) -> String {
        let Some(template) = self.tables.get(locale).and_then(|table| table.get(key)) else {
            return format!("missing translation: {}", key);
        };
        let mut message = template.clone();
        for (name, value) in args {
            message = message.replace(&format!("{{{}}}", name), value);
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_render_both_locales() {
        let catalog = Catalog::builtin();
        let args = [("rule", "money".to_string())];
        assert_eq!(
            catalog.render("en", "rule_not_found", &args),
            "validation rule `money` does not exist"
        );
        assert_eq!(
            catalog.render("zh", "rule_not_found", &args),
            "校验规则 money 不存在"
        );
    }

    #[test]
    fn test_multiple_placeholders() {
        let catalog = Catalog::builtin();
        let args = [
            ("name", "姓名".to_string()),
            ("min", "1".to_string()),
            ("max", "5".to_string()),
        ];
        assert_eq!(
            catalog.render("zh", "string.between", &args),
            "姓名长度必须在1和5之间"
        );
    }

    #[test]
    fn test_missing_key_or_locale_falls_back() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.render("en", "no.such.key", &[]),
            "missing translation: no.such.key"
        );
        assert_eq!(
            catalog.render("fr", "required", &[]),
            "missing translation: required"
        );
    }

    #[test]
    fn test_insert_overrides_and_extends() {
        let mut catalog = Catalog::builtin();
        catalog.insert("en", "required", "{name} is mandatory");
        catalog.insert("de", "required", "{name} darf nicht leer sein");

        let args = [("name", "age".to_string())];
        assert_eq!(catalog.render("en", "required", &args), "age is mandatory");
        assert_eq!(
            catalog.render("de", "required", &args),
            "age darf nicht leer sein"
        );
        assert!(catalog.has("de", "required"));
    }
}
