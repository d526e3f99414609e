use tracing::debug;

use super::Progress;
use crate::error::{PipelineError, Result};
use crate::settings::Settings;
use crate::table::Table;

/// Case-insensitive literal matcher over a denylist.
/// Entries starting with `@` name a domain and are searched for in the text after the
/// address's `@`, so subdomains match too; other entries are searched in the whole text.
#[derive(Debug, Clone)]
pub struct Denylist {
    domains: Vec<String>,
    needles: Vec<String>,
}

impl Denylist {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut domains = Vec::new();
        let mut needles = Vec::new();
        for entry in entries {
            let entry = entry.as_ref().to_lowercase();
            match entry.strip_prefix('@') {
                Some("") => {}
                Some(domain) => domains.push(domain.to_string()),
                None if entry.is_empty() => {}
                None => needles.push(entry),
            }
        }
        Self { domains, needles }
    }

    /// True if `email` hits any entry, ignoring case.
    pub fn matches(&self, email: &str) -> bool {
        let email = email.to_lowercase();
        if self.needles.iter().any(|n| email.contains(n.as_str())) {
            return true;
        }
        match email.split_once('@') {
            Some((_, domain)) => self.domains.iter().any(|d| domain.contains(d.as_str())),
            None => false,
        }
    }
}

/// Drop every row whose email column (by position) matches the denylist.
/// Absent emails are coerced to empty text first and never match.
pub fn filter(
    mut table: Table,
    settings: &Settings,
    on_progress: &mut dyn FnMut(Progress),
) -> Result<Table> {
    let position = settings.email_column;
    let column = match table.columns.get(position) {
        Some(name) => name.clone(),
        None => {
            return Err(PipelineError::Schema {
                position,
                found: table.num_columns(),
            })
        }
    };
    on_progress(Progress::Filtering { column });

    let denylist = Denylist::new(&settings.denylist);
    let before = table.num_rows();
    let width = table.num_columns();
    table.rows.retain_mut(|row| {
        row.resize(width, None);
        let email = row[position].get_or_insert_with(String::new);
        !denylist.matches(email)
    });
    let removed = before - table.num_rows();

    debug!(removed, kept = table.num_rows(), "filtered");
    on_progress(Progress::Filtered { removed });
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leads() -> Table {
        Table::from_rows(
            ["a", "b", "c", "d", "email"],
            [
                ["1", "", "", "", "ana@gmail.com"],
                ["2", "", "", "", "USER@COLEGIOCARBONELL.COM.BR"],
                ["3", "", "", "", "user@sub.colegiocarbonell.com.br.other.com"],
                ["4", "", "", "", ""],
                ["5", "", "", "", "prof@SouCarbonell.com.br"],
                ["6", "", "", "", "carbonell.com.br@x.com"],
            ],
        )
    }

    #[test]
    fn matches_case_insensitive_substrings() {
        let d = Denylist::new(crate::settings::DEFAULT_DENYLIST);
        assert!(d.matches("USER@COLEGIOCARBONELL.COM.BR"));
        assert!(d.matches("user@sub.colegiocarbonell.com.br.other.com"));
        assert!(d.matches("prof@SouCarbonell.com.br"));
        assert!(!d.matches("user@colegiocarbonell.com"));
        assert!(!d.matches("carbonell.com.br@x.com"));
        assert!(!d.matches("colegiocarbonell.com.br"));
        // literal, not a pattern
        assert!(!d.matches("user@colegiocarbonellXcom.br"));
    }

    #[test]
    fn removes_denied_rows_keeping_order() {
        let mut events = Vec::new();
        let t = filter(leads(), &Settings::default(), &mut |p| events.push(p)).unwrap();
        let ids: Vec<_> = t.column_values(0).collect();
        assert_eq!(ids, vec![Some("1"), Some("4"), Some("6")]);
        assert_eq!(
            events,
            vec![
                Progress::Filtering {
                    column: "email".into()
                },
                Progress::Filtered { removed: 3 }
            ]
        );
    }

    #[test]
    fn plain_entries_match_the_whole_text() {
        let d = Denylist::new(["Teste", "@"]);
        assert!(d.matches("teste.lead@gmail.com"));
        assert!(!d.matches("ana@gmail.com"));
    }

    #[test]
    fn short_rows_are_padded_before_matching() {
        let t = Table {
            columns: ["a", "b", "c", "d", "email"].map(String::from).to_vec(),
            rows: vec![vec![Some("x".into())]],
        };
        let out = filter(t, &Settings::default(), &mut |_| {}).unwrap();
        assert_eq!(
            out.rows,
            vec![vec![Some("x".into()), None, None, None, Some(String::new())]]
        );
    }

    #[test]
    fn absent_email_becomes_empty_text() {
        let t = filter(leads(), &Settings::default(), &mut |_| {}).unwrap();
        assert_eq!(t.rows[1][4], Some(String::new()));
    }

    #[test]
    fn filtering_is_idempotent() {
        let s = Settings::default();
        let once = filter(leads(), &s, &mut |_| {}).unwrap();
        let mut events = Vec::new();
        let twice = filter(once.clone(), &s, &mut |p| events.push(p)).unwrap();
        assert_eq!(once, twice);
        assert_eq!(events.last(), Some(&Progress::Filtered { removed: 0 }));
    }

    #[test]
    fn no_match_keeps_every_row() {
        let t = Table::from_rows(
            ["a", "b", "c", "d", "email"],
            [["1", "", "", "", "x@y.com"], ["2", "", "", "", "z@w.org"]],
        );
        let out = filter(t, &Settings::default(), &mut |_| {}).unwrap();
        assert_eq!(out.num_rows(), 2);
    }

    #[test]
    fn four_columns_is_a_schema_error() {
        let t = Table::from_rows(["a", "b", "c", "d"], [["1", "2", "3", "4"]]);
        let err = filter(t, &Settings::default(), &mut |_| {}).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Schema {
                position: 4,
                found: 4
            }
        ));
    }

    #[test]
    fn custom_denylist_and_position() {
        let s = Settings {
            denylist: vec!["@Spam.io".into()],
            email_column: 0,
            ..Settings::default()
        };
        let t = Table::from_rows(["mail"], [["a@spam.io"], ["b@ok.io"]]);
        let out = filter(t, &s, &mut |_| {}).unwrap();
        assert_eq!(out.get(0, "mail"), Some("b@ok.io"));
        assert_eq!(out.num_rows(), 1);
    }
}
