use crate::core::config::{DEFAULT_INDEX_PATH, DEFAULT_LIMIT};
use crate::search::matcher::{DocumentRule, EmptyQueryPolicy, MatchOptions};
use clap::{Args, Parser, Subcommand, ValueEnum};

/// dsfind - Find patterns, components and docs in a design-system knowledge index
#[derive(Parser, Debug)]
#[command(name = "dsfind")]
#[command(about = "Ranked search over design-system patterns, components and crawled docs", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Index document: http(s) URL or file path
    #[arg(long, global = true, env = "DSFIND_INDEX", default_value = DEFAULT_INDEX_PATH)]
    pub index: String,

    /// Request timeout in seconds when fetching a remote index
    #[arg(long, global = true, default_value_t = 10)]
    pub timeout: u64,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank the index against a query and print the hits
    Search {
        /// Search query
        #[arg(value_name = "QUERY")]
        query: Option<String>,
        /// Maximum number of hits to print
        #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
        /// Print hits as JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        matching: MatchArgs,
    },
    /// Search as you type
    Interactive {
        /// Query shown on start
        #[arg(value_name = "QUERY", default_value = "tabell")]
        query: String,
        /// Maximum number of hits to show
        #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
        /// Quiet period after the last keystroke before ranking, in milliseconds
        #[arg(long, default_value_t = 150)]
        debounce_ms: u64,
        #[command(flatten)]
        matching: MatchArgs,
    },
    /// Show what the loaded index contains
    Inspect {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct MatchArgs {
    /// What an empty query returns
    #[arg(long, value_enum, default_value_t = EmptyQueryArg::Nothing)]
    pub empty_query: EmptyQueryArg,
    /// Do not bridge queries to components through alias groups
    #[arg(long)]
    pub no_aliases: bool,
    /// How crawled docs are matched
    #[arg(long, value_enum, default_value_t = DocRuleArg::Title)]
    pub doc_rule: DocRuleArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyQueryArg {
    /// No hits
    #[value(name = "none")]
    Nothing,
    /// Every item matches
    All,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocRuleArg {
    /// Title contains the query
    Title,
    /// Title contains the query, or the doc tokens cover every query word
    Tokens,
}

impl MatchArgs {
    pub fn options(&self) -> MatchOptions {
        MatchOptions {
            empty_query: match self.empty_query {
                EmptyQueryArg::Nothing => EmptyQueryPolicy::NoHits,
                EmptyQueryArg::All => EmptyQueryPolicy::MatchAll,
            },
            alias_groups: !self.no_aliases,
            documents: match self.doc_rule {
                DocRuleArg::Title => DocumentRule::Title,
                DocRuleArg::Tokens => DocumentRule::TitleOrTokens,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_search_defaults() {
        let cli = Cli::try_parse_from(["dsfind", "search", "knapp"]).unwrap();
        match cli.command {
            Commands::Search { query, limit, json, matching } => {
                assert_eq!(query.as_deref(), Some("knapp"));
                assert_eq!(limit, 6);
                assert!(!json);
                assert_eq!(matching.options(), MatchOptions::default());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_match_flags() {
        let cli = Cli::try_parse_from([
            "dsfind",
            "search",
            "--empty-query",
            "all",
            "--no-aliases",
            "--doc-rule",
            "tokens",
        ])
        .unwrap();
        let Commands::Search { matching, .. } = cli.command else {
            panic!("expected search");
        };
        assert_eq!(
            matching.options(),
            MatchOptions {
                empty_query: EmptyQueryPolicy::MatchAll,
                alias_groups: false,
                documents: DocumentRule::TitleOrTokens,
            }
        );
    }
}
