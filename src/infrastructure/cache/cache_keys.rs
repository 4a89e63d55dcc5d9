pub fn sheet_key(sheet: &str) -> String {
    format!("sheet:{}", sheet)
}
