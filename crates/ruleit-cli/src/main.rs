//! RuleIt command-line client
//!
//! Thin presentation layer over `ruleit-core` and `ruleit-client`: every
//! subcommand drives the editor core and the gateway the same way the
//! original pages did, one request at a time.

use std::io::Read;

use clap::{Parser, Subcommand};
use colored::Colorize;
use ruleit_client::{
    parse_evaluation_input, ClientConfig, RuleApiGateway, RuleListCache, RuleSummary,
    DEFAULT_BASE_URL,
};
use ruleit_core::{ExpressionBuilder, Operator, TokenEditor};

mod edit;

/// RuleIt - compose, edit, list, and evaluate boolean rules
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the rule service (default: $RULEIT_API_URL, then the
    /// local development server)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List stored rules, one page at a time
    List {
        /// Page number (1-indexed, 10 rules per page)
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Show one stored rule
    Show {
        /// Rule id
        id: i64,
    },

    /// Create a rule from one fragment, or combine several
    Create {
        /// Rule name
        name: String,

        /// A rule fragment; repeat the flag to combine several
        #[arg(short = 'r', long = "rule", required = true)]
        rules: Vec<String>,

        /// Connective between consecutive fragments
        /// (AND, OR, XOR, NAND, NOR, XNOR); one fewer than fragments
        #[arg(short = 'o', long = "operator")]
        operators: Vec<String>,
    },

    /// Edit a rule's tokens interactively, then submit the update
    Edit {
        /// Rule id
        id: i64,
    },

    /// Evaluate a rule against a JSON object
    Eval {
        /// Rule id
        id: i64,

        /// JSON input data; pass '-' to read it from stdin
        data: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let base_url = cli
        .api_url
        .or_else(|| std::env::var("RULEIT_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let gateway = RuleApiGateway::new(ClientConfig::new(base_url))?;

    match cli.command {
        Commands::List { page } => {
            let mut cache = RuleListCache::new(gateway);
            cache.fetch_page(page).await?;
            if cache.rules().is_empty() {
                println!("no rules on page {page}");
            }
            for rule in cache.rules() {
                print_summary(rule);
            }
            println!(
                "page {} of {} ({} rules total)",
                cache.current_page(),
                cache.page_count(),
                cache.count()
            );
        }
        Commands::Show { id } => {
            let rule = gateway.fetch_rule(id).await?;
            print_summary(&rule);
        }
        Commands::Create {
            name,
            rules,
            operators,
        } => {
            let mut builder = ExpressionBuilder::new(name);
            let mut rules = rules.into_iter();
            builder = builder.fragment(rules.next().unwrap_or_default());
            let mut operators = operators.iter();
            for fragment in rules {
                if let Some(op) = operators.next() {
                    builder = builder.operator(op.parse::<Operator>()?);
                }
                builder = builder.fragment(fragment);
            }
            for op in operators {
                // Surplus operators still reach the builder so the count
                // check reports the real mismatch.
                builder = builder.operator(op.parse::<Operator>()?);
            }
            let expression = builder.build()?;
            let rule = gateway.submit(&expression).await?;
            println!("rule created");
            print_summary(&rule);
        }
        Commands::Edit { id } => {
            let rule = gateway.fetch_rule(id).await?;
            let mut editor = TokenEditor::from_tokens(rule.tokens);
            match edit::run(&mut editor)? {
                Some(rule_text) => {
                    let updated = gateway.edit_rule(id, &rule_text).await?;
                    println!("rule updated");
                    print_summary(&updated);
                }
                None => println!("edit abandoned, rule unchanged"),
            }
        }
        Commands::Eval { id, data } => {
            let text = if data == "-" {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                buffer
            } else {
                data
            };
            let input = parse_evaluation_input(&text)?;
            let passed = gateway.evaluate(id, input).await?;
            if passed {
                println!("{}", "Rule Passed".green());
            } else {
                println!("{}", "Rule Failed".red());
            }
        }
    }

    Ok(())
}

fn print_summary(rule: &RuleSummary) {
    println!(
        "Rule Name: {}    Rule ID: {}    Root ID: {}",
        rule.name, rule.id, rule.root_id
    );
    println!("  {}", rule.tokens.join(" "));
}
