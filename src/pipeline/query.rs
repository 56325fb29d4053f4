// src/pipeline/query.rs

//! Query permutations.

use crate::models::SearchConfig;

/// Builds search queries from roles and locations.
#[derive(Debug, Clone)]
pub struct QueryBuilder<'a> {
    roles: &'a [String],
    locations: &'a [String],
    qualifier: Option<&'a str>,
    seniority: &'a str,
}

impl<'a> QueryBuilder<'a> {
    /// Create a builder over explicit lists.
    pub fn new(roles: &'a [String], locations: &'a [String], seniority: &'a str) -> Self {
        Self {
            roles,
            locations,
            qualifier: None,
            seniority,
        }
    }

    /// Create a builder from the search configuration.
    pub fn from_config(config: &'a SearchConfig) -> Self {
        let builder = Self::new(&config.roles, &config.locations, &config.seniority);
        if config.include_qualifier {
            builder.with_qualifier(&config.qualifier)
        } else {
            builder
        }
    }

    /// Also emit a qualified variant of every query.
    pub fn with_qualifier(mut self, qualifier: &'a str) -> Self {
        self.qualifier = Some(qualifier);
        self
    }

    /// Build all queries, role-major and location-minor.
    ///
    /// Each (role, location) pair yields the qualified query (when enabled)
    /// followed by the plain one.
    pub fn build(&self) -> Vec<String> {
        let per_pair = if self.qualifier.is_some() { 2 } else { 1 };
        let mut queries = Vec::with_capacity(self.roles.len() * self.locations.len() * per_pair);

        for role in self.roles {
            for location in self.locations {
                if let Some(qualifier) = self.qualifier {
                    queries.push(join_terms(&[
                        role.as_str(),
                        qualifier,
                        self.seniority,
                        location.as_str(),
                    ]));
                }
                queries.push(join_terms(&[role.as_str(), self.seniority, location.as_str()]));
            }
        }
        queries
    }
}

/// Join non-empty terms with single spaces.
fn join_terms(terms: &[&str]) -> String {
    terms
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
