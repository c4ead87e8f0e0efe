use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use http::Method;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

use crate::config::RouterConfig;
use crate::dispatcher::{status_reason, Dispatcher, Request};
use crate::echo::echo_view;
use crate::logging::init_logging;
use crate::registry::ViewRegistry;
use crate::router::{RouteEntry, RoutingTable};
use crate::view::Kwargs;
use crate::wrapper::{TracingWrapper, WrapperChain};

/// Command-line interface for verbrouter
///
/// Inspects and exercises a demo routing table.
#[derive(Parser)]
#[command(name = "verbrouter")]
#[command(about = "Verb-aware URL routing demo", long_about = None)]
pub struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true, env = "VERBROUTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for `routes`
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List the routes of the demo table in resolution order
    Routes {
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Dispatch one request through the demo table and print the response
    Dispatch {
        /// HTTP method of the request
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Request target, path plus optional query string
        #[arg(short, long)]
        path: String,

        /// Form field sent as a urlencoded body (repeatable)
        #[arg(short, long = "form", value_name = "KEY=VALUE")]
        form: Vec<String>,
    },
}

/// Demo table: a method-dispatched item resource, a catch-all ping and a
/// nested blog table
///
/// # Errors
///
/// Only if a demo pattern fails to configure.
pub fn demo_table(config: &RouterConfig) -> Result<RoutingTable> {
    let registry = ViewRegistry::new()
        .with_view(echo_view("demo.item_show"))
        .with_view(echo_view("demo.item_update"))
        .with_view(echo_view("demo.item_delete"))
        .with_view(echo_view("demo.ping").csrf_exempt());

    let mut blog = RoutingTable::with_registry(registry.clone()).with_config(config);
    blog.register(
        vec![
            RouteEntry::verb(Method::GET, r"^(?P<slug>[\w-]+)/$", echo_view("blog.post_show"))
                .name("blog-post"),
            RouteEntry::verb(Method::POST, r"^(?P<slug>[\w-]+)/$", echo_view("blog.post_comment")),
        ],
        WrapperChain::new().with(std::sync::Arc::new(TracingWrapper)),
    )?;

    let mut table = RoutingTable::with_registry(registry).with_config(config);
    table.register(
        vec![
            RouteEntry::verb(Method::GET, r"^items/(?P<id>\d+)/$", "item_show")
                .prefix("demo")
                .name("item"),
            RouteEntry::verb(Method::PUT, r"^items/(?P<id>\d+)/$", "item_update")
                .prefix("demo")
                .default_arg("action", "update"),
            RouteEntry::verb(Method::DELETE, r"^items/(?P<id>\d+)/$", "item_delete")
                .prefix("demo"),
            RouteEntry::url("^ping$", "demo.ping").name("ping"),
        ],
        WrapperChain::new().with(std::sync::Arc::new(TracingWrapper)),
    )?;
    let mut blog_defaults = Kwargs::new();
    blog_defaults.insert("section".to_string(), "blog".into());
    table.include(r"^blog/(?P<lang>[a-z]{2})/", blog, blog_defaults)?;
    Ok(table)
}

fn parse_form(fields: &[String]) -> Result<String> {
    let mut body = url::form_urlencoded::Serializer::new(String::new());
    for field in fields {
        let (key, value) = field
            .split_once('=')
            .ok_or_else(|| anyhow!("Form field {field:?} is not KEY=VALUE"))?;
        body.append_pair(key, value);
    }
    Ok(body.finish())
}

/// Run `cli` with an already loaded configuration, writing to `out`
///
/// # Errors
///
/// Invalid arguments, demo configuration errors, or a write failure.
pub fn execute(cli: &Cli, config: &RouterConfig, out: &mut dyn Write) -> Result<()> {
    let table = demo_table(config)?;
    match &cli.command {
        Commands::Routes { format } => match format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, &table.routes())?;
                writeln!(out)?;
            }
            OutputFormat::Table => {
                for route in table.routes() {
                    writeln!(
                        out,
                        "{:<8} {:<40} {:<24} {}",
                        route.method.as_deref().unwrap_or("*"),
                        route.pattern,
                        route.view,
                        route.name.as_deref().unwrap_or("-"),
                    )?;
                }
            }
        },
        Commands::Dispatch { method, path, form } => {
            let mut req = Request::with_method_name(method, path)
                .ok_or_else(|| anyhow!("Invalid HTTP method {method:?}"))?;
            if !form.is_empty() {
                req = req.with_form_body(&parse_form(form)?);
            }
            let dispatcher = Dispatcher::from_table(table);
            let res = dispatcher
                .handle(&mut req)
                .with_context(|| format!("Dispatch of {method} {path} failed"))?;
            writeln!(out, "{} {}", res.status, status_reason(res.status))?;
            for (name, value) in &res.headers {
                writeln!(out, "{name}: {value}")?;
            }
            writeln!(out)?;
            serde_json::to_writer_pretty(&mut *out, &res.body)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Load configuration, install logging and run `cli` against stdout
///
/// # Errors
///
/// Configuration, logging setup or command failure.
pub fn run_cli(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => RouterConfig::from_file(path)?,
        None => RouterConfig::from_env(),
    };
    init_logging(&config.log)?;
    info!(override_field = %config.method_override_field, "Configuration loaded");
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&cli, &config, &mut out)
}
