/// Model name from a firmware identification report.
///
/// Devices answer the firmware query with the product string in ASCII, padded with
/// NULs to the report size, possibly spread over several reports that the caller
/// concatenates. Returns `None` if nothing printable remains.
pub fn model_from_firmware(report: &[u8]) -> Option<String> {
    let end = report
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(report.len());
    let text = std::str::from_utf8(&report[..end]).ok()?;
    let text = text.trim();
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_graphic() || c == ' ') {
        return None;
    }
    Some(text.to_string())
}
