use anyhow::Context;
use clap::Parser;
use mcb_content::{ClientConfig, ContentClient};
use mcb_core::SiteConfig;
use mcb_site::{simulator, CreditScore, NewsletterClient, Profile};
use mcb_web::AppState;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();
        let mut has_unit = false;

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if let Ok(num) = current_number.parse::<u64>() {
                let unit = match c {
                    's' => 1,
                    'm' => 60,
                    'h' => 3600,
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                };
                total_seconds = num
                    .checked_mul(unit)
                    .and_then(|secs| total_seconds.checked_add(secs))
                    .ok_or_else(|| "Duration too large".to_string())?;
                current_number.clear();
                has_unit = true;
            } else if !c.is_whitespace() {
                return Err(format!("Invalid character in duration: {}", c));
            }
        }

        // A bare number is seconds
        if !current_number.is_empty() {
            let num = current_number
                .parse::<u64>()
                .map_err(|_| "Invalid number in duration".to_string())?;
            total_seconds = total_seconds
                .checked_add(num)
                .ok_or_else(|| "Duration too large".to_string())?;
            has_unit = true;
        }

        if !has_unit {
            return Err("Duration must include a number".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

#[derive(Parser, Debug)]
#[command(name = "mcb", author, version, about = "Melhores Cartões Brasil content backend", long_about = None)]
pub struct Cli {
    /// Overrides API_URL
    #[arg(long)]
    api_url: Option<String>,
    /// Overrides SITE_ID
    #[arg(long)]
    site_id: Option<String>,
    /// Overrides LOCALE
    #[arg(long)]
    locale: Option<String>,
    /// Overrides CACHE_TTL_SECS (e.g. 300, 5m, 1h15m)
    #[arg(long)]
    cache_ttl: Option<HumanDuration>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve the JSON API
    Serve {
        #[arg(long, env = "MCB_HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "PORT", default_value_t = 3000)]
        port: u16,
    },
    Articles {
        #[command(subcommand)]
        command: ArticleCommands,
    },
    /// Estimate the card limit for a spending profile
    Simulate {
        #[arg(long)]
        spend: f64,
        #[arg(long, default_value = "good")]
        score: CreditScore,
        #[arg(long)]
        employee: bool,
        #[arg(long)]
        income: bool,
    },
    Subscribe {
        email: String,
    },
    /// Print the effective configuration and whether it is complete
    Config,
}

#[derive(clap::Subcommand, Debug)]
enum ArticleCommands {
    List {
        #[arg(long, default_value_t = mcb_content::DEFAULT_LIMIT)]
        limit: usize,
        #[arg(long, default_value_t = 0)]
        offset: usize,
    },
    Get {
        slug: String,
    },
}

impl Cli {
    fn site_config(&self) -> anyhow::Result<SiteConfig> {
        let mut site = SiteConfig::from_env().context("loading site configuration")?;
        if let Some(api_url) = &self.api_url {
            site.api_url = api_url.clone();
        }
        if let Some(site_id) = &self.site_id {
            site.site_id = site_id.clone();
        }
        if let Some(locale) = &self.locale {
            site.locale = locale.clone();
        }
        if let Some(ttl) = self.cache_ttl {
            site.cache_ttl = ttl.0;
        }
        Ok(site)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let site = cli.site_config()?;

    let validation = site.validate();
    if !validation.is_valid() {
        tracing::warn!("⚠️ missing configuration: {}", validation.missing.join(", "));
    }

    match cli.command {
        Commands::Serve { host, port } => {
            let addr: SocketAddr = format!("{}:{}", host, port)
                .parse()
                .with_context(|| format!("invalid listen address {}:{}", host, port))?;
            info!("🚀 serving {} ({}) from {}", site.site_name, site.locale, site.api_url);
            let state = AppState::from_site(site)?;
            mcb_web::serve(state, addr).await?;
        }
        Commands::Articles { command } => {
            let client = ContentClient::new(ClientConfig::from_site(&site)?);
            match command {
                ArticleCommands::List { limit, offset } => {
                    let resolved = client.list_articles(limit, offset).await;
                    info!("📚 {} articles ({})", resolved.value.len(), resolved.origin);
                    for article in &resolved.value {
                        println!("{}\t{}\t{}", article.slug, article.published_at, article.title);
                    }
                }
                ArticleCommands::Get { slug } => {
                    let resolved = client.get_article_by_slug(&slug).await;
                    info!("📄 {} ({})", slug, resolved.origin);
                    match resolved.value {
                        Some(article) => println!("{}", serde_json::to_string_pretty(&article)?),
                        None => anyhow::bail!("article not found: {}", slug),
                    }
                }
            }
        }
        Commands::Simulate { spend, score, employee, income } => {
            let profile = Profile {
                monthly_spend: spend,
                score,
                employed: employee,
                has_income: income,
            };
            for offer in simulator::simulate(&profile)? {
                println!("{:<10} {:>12} {:<12} {}", offer.name, offer.limit_display, offer.fee, offer.score);
            }
        }
        Commands::Subscribe { email } => {
            let newsletter = NewsletterClient::from_site(&site)?;
            let subscription = newsletter.subscribe(&email).await?;
            info!("📬 delivered via {:?}", subscription.channel);
            println!("{}", subscription.message);
        }
        Commands::Config => {
            println!("site_id      {}", site.site_id);
            println!("site_name    {}", site.site_name);
            println!("site_url     {}", site.site_url);
            println!("api_url      {}", site.api_url);
            println!("locale       {}", site.locale);
            println!("cache_ttl    {}s", site.cache_ttl.as_secs());
            println!("posthog      {}", if site.posthog_key.is_some() { "enabled" } else { "disabled" });
            println!("revive_url   {}", site.revive_url.as_deref().unwrap_or("-"));
            if validation.is_valid() {
                println!("✨ configuration is complete");
            } else {
                anyhow::bail!("missing configuration: {}", validation.missing.join(", "));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_duration() {
        assert_eq!("300".parse::<HumanDuration>().unwrap().0, Duration::from_secs(300));
        assert_eq!("5m".parse::<HumanDuration>().unwrap().0, Duration::from_secs(300));
        assert_eq!("1h15m30s".parse::<HumanDuration>().unwrap().0, Duration::from_secs(4530));
        assert!("5d".parse::<HumanDuration>().is_err());
        assert!("".parse::<HumanDuration>().is_err());
        assert!("m".parse::<HumanDuration>().is_err());
    }

    #[test]
    fn test_human_duration_overflow_is_an_error() {
        assert_eq!("6000000000000000h".parse::<HumanDuration>(), Err("Duration too large".to_string()));
        assert_eq!("18446744073709551615s1s".parse::<HumanDuration>(), Err("Duration too large".to_string()));
        assert_eq!("18446744073709551615s1".parse::<HumanDuration>(), Err("Duration too large".to_string()));
        assert!("99999999999999999999999".parse::<HumanDuration>().is_err());
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["mcb", "--locale", "en", "--cache-ttl", "10m", "articles", "list", "--limit", "2"]).unwrap();
        assert_eq!(cli.locale.as_deref(), Some("en"));
        assert_eq!(cli.cache_ttl, Some(HumanDuration(Duration::from_secs(600))));
        assert!(matches!(cli.command, Commands::Articles { command: ArticleCommands::List { limit: 2, offset: 0 } }));

        let cli = Cli::try_parse_from(["mcb", "simulate", "--spend", "1500", "--score", "excellent", "--employee"]).unwrap();
        match cli.command {
            Commands::Simulate { spend, score, employee, income } => {
                assert_eq!(spend, 1500.0);
                assert_eq!(score, CreditScore::Excellent);
                assert!(employee);
                assert!(!income);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_score() {
        assert!(Cli::try_parse_from(["mcb", "simulate", "--spend", "10", "--score", "otimo"]).is_err());
    }
}
