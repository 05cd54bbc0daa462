use crate::model::{Entry, WriteOptions};

/// Serialize entries to store text, one line per entry.
///
/// The two [`WriteOptions`] flags select one of four line templates:
/// `key = 'value'`, `key='value'`, `key = value`, or `key=value`. Values
/// are never escaped; a value containing a newline, `=`, or the quote
/// character will corrupt the format on the next parse.
pub fn render(entries: &[Entry], options: WriteOptions) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&render_entry(entry, options));
        out.push('\n');
    }
    out
}

fn render_entry(entry: &Entry, options: WriteOptions) -> String {
    let Entry { key, value } = entry;
    match (options.use_quotes, options.space_assignment) {
        (true, true) => format!("{key} = '{value}'"),
        (true, false) => format!("{key}='{value}'"),
        (false, true) => format!("{key} = {value}"),
        (false, false) => format!("{key}={value}"),
    }
}
