use std::fmt;

use crate::error::ValidationError;

pub const QUERY_STRING: &str = "QueryString";

/// Argument names accepted by the search endpoints
pub const VALID_ARGUMENTS: [&str; 7] = [
    QUERY_STRING,
    "ReturnAllContactPoints",
    "Rows",
    "Offset",
    "Filters",
    "Facets",
    "SortBy",
];

/// Upstream resource paths, relative to the versioned base URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Persons and companies
    Unit,
    Person,
    Company,
    PhoneNumber,
    InfoFilter,
    InfoSortBy,
    InfoFacet,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Unit => "unit",
            Endpoint::Person => "person",
            Endpoint::Company => "company",
            Endpoint::PhoneNumber => "phonenumber",
            Endpoint::InfoFilter => "info/filter",
            Endpoint::InfoSortBy => "info/sortby",
            Endpoint::InfoFacet => "info/facet",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Ordered argument map sent as the request query string.
///
/// Inserting a key that is already present replaces its value in place, so the
/// original position is kept and the last write wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryArguments {
    entries: Vec<(String, String)>,
}

impl QueryArguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn arg(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    pub fn query_string(self, query: impl ToString) -> Self {
        self.arg(QUERY_STRING, query)
    }

    pub fn rows(self, rows: u32) -> Self {
        self.arg("Rows", rows)
    }

    pub fn offset(self, offset: u32) -> Self {
        self.arg("Offset", offset)
    }

    pub fn filters(self, filters: impl ToString) -> Self {
        self.arg("Filters", filters)
    }

    pub fn facets(self, facets: impl ToString) -> Self {
        self.arg("Facets", facets)
    }

    pub fn sort_by(self, sort_by: impl ToString) -> Self {
        self.arg("SortBy", sort_by)
    }

    pub fn return_all_contact_points(self, all: bool) -> Self {
        self.arg("ReturnAllContactPoints", all)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Key/value pairs in insertion order, ready for `reqwest`'s `query()`
    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Copy every entry of `other` over `self`
    pub fn overlay(&mut self, other: QueryArguments) {
        for (key, value) in other.entries {
            self.insert(key, value);
        }
    }

    /// Reject the first key that is not in [`VALID_ARGUMENTS`]
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self
            .entries
            .iter()
            .find(|(key, _)| !VALID_ARGUMENTS.contains(&key.as_str()))
        {
            Some((key, _)) => Err(ValidationError::UnknownArgument(key.clone())),
            None => Ok(()),
        }
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for QueryArguments {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = QueryArguments::new();
        for (key, value) in iter {
            args.insert(key, value);
        }
        args
    }
}

/// Strip everything but ASCII digits from a phone number
pub fn normalize_phone_number(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Build the validated argument map for one request.
///
/// A non-empty `query` seeds `QueryString`, then `extra` is laid on top. The
/// phone endpoint never sends the raw query: only its digits go out as
/// `QueryString`, and input without any digits is rejected.
pub fn assemble(
    endpoint: Endpoint,
    query: Option<&str>,
    extra: QueryArguments,
) -> Result<QueryArguments, ValidationError> {
    let mut args = QueryArguments::new();

    match (endpoint, query) {
        (Endpoint::PhoneNumber, Some(number)) => {
            let digits = normalize_phone_number(number);
            if !digits.is_empty() {
                args.insert(QUERY_STRING, digits);
            } else if !extra.contains(QUERY_STRING) {
                return Err(ValidationError::InvalidPhoneNumber(number.to_string()));
            }
        }
        (_, Some(query)) if !query.is_empty() => args.insert(QUERY_STRING, query),
        _ => {}
    }

    args.overlay(extra);
    args.validate()?;

    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_seeds_query_string() {
        let args = assemble(Endpoint::Unit, Some("acme"), QueryArguments::new()).unwrap();
        assert_eq!(args.as_pairs(), &[("QueryString".to_string(), "acme".to_string())]);
    }

    #[test]
    fn test_extra_arguments_win() {
        let extra = QueryArguments::new().rows(5).query_string("override");
        let args = assemble(Endpoint::Person, Some("acme"), extra).unwrap();

        assert_eq!(args.get("QueryString"), Some("override"));
        assert_eq!(args.get("Rows"), Some("5"));
        let keys: Vec<&str> = args.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["QueryString", "Rows"]);
    }

    #[test]
    fn test_empty_query_is_not_injected() {
        let args = assemble(Endpoint::Company, Some(""), QueryArguments::new()).unwrap();
        assert!(args.is_empty());

        let args = assemble(Endpoint::InfoFacet, None, QueryArguments::new()).unwrap();
        assert!(args.is_empty());
    }

    #[test]
    fn test_unknown_argument_rejected() {
        let extra = QueryArguments::new().rows(10).arg("Limit", 10);
        let err = assemble(Endpoint::Unit, Some("acme"), extra).unwrap_err();
        assert_eq!(err, ValidationError::UnknownArgument("Limit".to_string()));
    }

    #[test]
    fn test_argument_names_are_case_sensitive() {
        let args = QueryArguments::new().arg("rows", 10);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_every_valid_argument_passes() {
        let args: QueryArguments = VALID_ARGUMENTS.iter().map(|k| (*k, "x")).collect();
        assert_eq!(args.len(), VALID_ARGUMENTS.len());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_phone_sends_normalized_digits() {
        let args =
            assemble(Endpoint::PhoneNumber, Some("+47 12 34-56 78"), QueryArguments::new())
                .unwrap();
        assert_eq!(args.get("QueryString"), Some("4712345678"));
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn test_phone_explicit_query_string_wins() {
        let extra = QueryArguments::new().query_string("99999999");
        let args = assemble(Endpoint::PhoneNumber, Some("12 34 56 78"), extra).unwrap();
        assert_eq!(args.get("QueryString"), Some("99999999"));

        let extra = QueryArguments::new().query_string("99999999");
        let args = assemble(Endpoint::PhoneNumber, Some("n/a"), extra).unwrap();
        assert_eq!(args.get("QueryString"), Some("99999999"));
    }

    #[test]
    fn test_phone_without_digits_rejected() {
        let err =
            assemble(Endpoint::PhoneNumber, Some("call me"), QueryArguments::new()).unwrap_err();
        assert_eq!(err, ValidationError::InvalidPhoneNumber("call me".to_string()));
    }

    #[test]
    fn test_normalize_phone_number() {
        assert_eq!(normalize_phone_number("12 34 56 78"), "12345678");
        assert_eq!(normalize_phone_number("(+47) 800-12-345"), "4780012345");
        assert_eq!(normalize_phone_number("٣٤٥"), "");
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut args = QueryArguments::new().rows(1).offset(2);
        args.insert("Rows", 3);
        assert_eq!(
            args.as_pairs(),
            &[
                ("Rows".to_string(), "3".to_string()),
                ("Offset".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::Unit.path(), "unit");
        assert_eq!(Endpoint::PhoneNumber.to_string(), "phonenumber");
        assert_eq!(Endpoint::InfoFilter.path(), "info/filter");
        assert_eq!(Endpoint::InfoSortBy.path(), "info/sortby");
        assert_eq!(Endpoint::InfoFacet.path(), "info/facet");
    }
}
