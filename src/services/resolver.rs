//! 年级 → 教学点联动选择
//!
//! 纯查表：切换年级后由调用方用 [`reconcile_center`] 清理失效的教学点。

use crate::models::GradeCenterTable;

/// 年级可选的教学点（有序）；未知年级返回空切片
pub fn allowed_centers<'a>(table: &'a GradeCenterTable, grade: &str) -> &'a [String] {
    table.centers(grade.trim())
}

/// 切换年级后保留仍然有效的教学点，失效则返回 `None`
pub fn reconcile_center(
    table: &GradeCenterTable,
    new_grade: &str,
    current_center: &str,
) -> Option<String> {
    let current = current_center.trim();
    allowed_centers(table, new_grade)
        .iter()
        .find(|c| c.as_str() == current)
        .cloned()
}

/// 下拉框显示用的 (key, label) 列表
pub fn grade_options(table: &GradeCenterTable) -> Vec<(&str, &str)> {
    table
        .grades()
        .iter()
        .map(|g| (g.key.as_str(), g.label.as_str()))
        .collect()
}

/// 教学点显示名：首字母大写
pub fn center_label(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_centers_lookup() {
        let table = GradeCenterTable::default();
        assert_eq!(allowed_centers(&table, "1st prep"), ["cambridge"]);
        assert_eq!(allowed_centers(&table, "2nd sec"), ["heights", "60"]);
        assert!(allowed_centers(&table, "unknown").is_empty());
    }

    #[test]
    fn test_grade_change_invalidates_stale_center() {
        let table = GradeCenterTable::default();
        // cambridge 不属于 3rd prep
        assert_eq!(reconcile_center(&table, "3rd prep", "cambridge"), None);
        // heights 同时属于 2nd prep 和 3rd prep
        assert_eq!(
            reconcile_center(&table, "3rd prep", "heights"),
            Some("heights".to_string())
        );
        assert_eq!(reconcile_center(&table, "unknown", "heights"), None);
        assert_eq!(reconcile_center(&table, "1st prep", ""), None);
    }

    #[test]
    fn test_center_label() {
        assert_eq!(center_label("cambridge"), "Cambridge");
        assert_eq!(center_label("top academy"), "Top academy");
        assert_eq!(center_label("60"), "60");
        assert_eq!(center_label(""), "");
    }

    #[test]
    fn test_grade_options_keep_table_order() {
        let table = GradeCenterTable::default();
        let options = grade_options(&table);
        assert_eq!(options.len(), 5);
        assert_eq!(options[0], ("1st prep", "1st Preparatory"));
        assert_eq!(options[4], ("2nd sec", "2nd Secondary"));
    }
}
