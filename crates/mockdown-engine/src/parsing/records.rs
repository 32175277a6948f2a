/// Field name that starts a new record.
pub const ID_FIELD: &str = "ID";

/// Record key used when fields arrive before any `ID` line.
pub const DEFAULT_KEY: &str = "record_default";

/// Record key for an `ID` value.
pub fn record_key(id_value: &str) -> String {
    format!("record_{id_value}")
}

/// One logical record: insertion-ordered field name/value pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Sets a field, overwriting an earlier value for the same name.
    pub fn set(&mut self, name: &str, value: &str) {
        if let Some(slot) = self.fields.iter_mut().find(|(n, _)| n == name) {
            slot.1 = value.to_string();
        } else {
            self.fields.push((name.to_string(), value.to_string()));
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Insertion-ordered record table for one tab, with the active-record
/// cursor that non-`ID` fields write through.
#[derive(Debug, Clone, Default)]
pub struct RecordTable {
    entries: Vec<(String, Record)>,
    cursor: Option<String>,
}

impl RecordTable {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Starts (or, for a duplicate `ID` value, re-addresses) a record and
    /// moves the cursor to it. Duplicates merge into the first occurrence.
    pub fn start_record(&mut self, key: &str) {
        if self.position(key).is_none() {
            self.entries.push((key.to_string(), Record::default()));
        }
        self.cursor = Some(key.to_string());
    }

    /// Key the next non-`ID` field writes to: the cursor if an `ID` line has
    /// been seen, the default record otherwise.
    pub fn active_key(&self) -> &str {
        self.cursor.as_deref().unwrap_or(DEFAULT_KEY)
    }

    /// Writes a field into the record for `key`, creating the record if it
    /// does not exist yet. The cursor is not moved.
    pub fn set_field(&mut self, key: &str, name: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, record)) => record.set(name, value),
            None => {
                let mut record = Record::default();
                record.set(name, value);
                self.entries.push((key.to_string(), record));
            }
        }
    }

    /// Row position of a record, in `ID`-line insertion order.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    /// Flattens the table to rows in record insertion order, one value per
    /// header; missing fields become empty strings.
    pub fn rows(&self, headers: &[String]) -> Vec<Vec<String>> {
        self.entries
            .iter()
            .map(|(_, record)| {
                headers
                    .iter()
                    .map(|header| record.get(header).unwrap_or_default().to_string())
                    .collect()
            })
            .collect()
    }
}
