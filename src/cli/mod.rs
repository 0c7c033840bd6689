//! CLI argument parsing module
//!
//! This module handles command-line argument parsing and application entry point.

use crate::config::{Config, CookieSourceConfig, DEFAULT_BACKEND_URL};
use crate::cookies::{Collection, CookieCollector};
use crate::error::{BridgeError, Result};
use crate::exit_code::exit_code_for_error;
use crate::http::progress::{DownloadProgress, SseDecoder};
use crate::http::response::ResponseFormatter;
use crate::http::{BackendClient, RequestOptions};
use crate::output::OutputWriter;
use crate::utils::{FileUtils, StringUtils};
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};
use futures_util::StreamExt;
use log::debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::Response;

/// Main entry point for the CLI application
pub fn run() {
    let matches = create_app().get_matches();
    crate::logging::init(matches.get_flag("verbose"));

    if let Err(e) = run_with_args(&matches) {
        if !matches.get_flag("silent") {
            eprintln!("cookiebridge: error: {}", e);
        }
        std::process::exit(exit_code_for_error(&e));
    }
}

/// Run cookiebridge with parsed command line arguments
fn run_with_args(matches: &ArgMatches) -> Result<()> {
    let mut config = build_config_from_args(matches)?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| BridgeError::Config(format!("Failed to create async runtime: {}", e)))?;

    match matches.subcommand() {
        Some(("info", sub)) => {
            apply_output_args(&mut config, sub)?;
            config.output.format_json = !sub.get_flag("raw");
            let options = build_request_options(sub, true)?;
            let url = required_url(sub)?;
            rt.block_on(run_info(&config, &url, &options))
        }
        Some(("download", sub)) => {
            apply_output_args(&mut config, sub)?;
            let options = build_request_options(sub, false)?;
            let url = required_url(sub)?;
            rt.block_on(run_download(&config, &url, &options))
        }
        Some(("cookies", sub)) => {
            apply_output_args(&mut config, sub)?;
            rt.block_on(run_cookies(&config))
        }
        _ => Err(BridgeError::Config("No command given".to_string())),
    }
}

async fn run_info(config: &Config, url: &str, options: &RequestOptions) -> Result<()> {
    let client = BackendClient::new(config)?;
    let response = client.fetch_video_info(url, options).await?;
    let response = ensure_success(response).await?;

    let content_type = content_type(&response);
    let body = response.text().await.map_err(BridgeError::Http)?;
    let formatted =
        ResponseFormatter::new(config.output.format_json).format(&body, content_type.as_deref())?;

    OutputWriter::new(config.output.clone()).write(&formatted)
}

async fn run_download(config: &Config, url: &str, options: &RequestOptions) -> Result<()> {
    let client = BackendClient::new(config)?;
    let response = client.download_video(url, options).await?;
    let response = ensure_success(response).await?;

    let writer = OutputWriter::new(config.output.clone());
    let mut decoder = SseDecoder::new();
    let mut completed = None;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(BridgeError::Http)?;
        for event in decoder.feed(&chunk) {
            handle_progress_event(&event, &writer, &mut completed)?;
        }
    }
    if let Some(event) = decoder.finish() {
        handle_progress_event(&event, &writer, &mut completed)?;
    }
    writer.finish_progress()?;

    match completed {
        Some(summary) => writer.write(&summary),
        None => Err(BridgeError::Backend(
            "download stream ended before completion".to_string(),
        )),
    }
}

fn handle_progress_event(
    raw: &str,
    writer: &OutputWriter,
    completed: &mut Option<String>,
) -> Result<()> {
    let progress: DownloadProgress = serde_json::from_str(raw)?;
    debug!("progress event: {}", progress.status);

    if progress.is_error() {
        writer.finish_progress()?;
        return Err(BridgeError::Backend(
            progress
                .message
                .unwrap_or_else(|| "download failed".to_string()),
        ));
    }

    writer.write_progress(&progress)?;
    if progress.is_completed() {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        *completed = Some(serde_json::to_string_pretty(&value)?);
    }
    Ok(())
}

async fn run_cookies(config: &Config) -> Result<()> {
    let collector = CookieCollector::new(config.cookie_source.build());
    match collector.collect_detailed().await {
        Collection::Present(file) => {
            OutputWriter::new(config.output.clone()).write(&file.to_string())
        }
        Collection::Absent(reason) => {
            debug!("no cookie file produced: {}", reason);
            Err(BridgeError::NoCookies)
        }
    }
}

/// Turn a non-2xx response into an error carrying the body
async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(BridgeError::BackendStatus {
        status: status.as_u16(),
        body,
    })
}

fn content_type(response: &Response) -> Option<String> {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
}

/// Create the CLI application structure
fn create_app() -> Command {
    Command::new("cookiebridge")
        .version(crate::VERSION)
        .about("Send a site's cookies as a Netscape cookie file to a local video backend")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(Arg::new("backend")
            .long("backend")
            .value_name("URL")
            .env("COOKIEBRIDGE_BACKEND")
            .default_value(DEFAULT_BACKEND_URL)
            .global(true)
            .help("Base URL of the video backend"))
        .arg(Arg::new("cookie")
            .short('b')
            .long("cookie")
            .value_name("NAME=VALUE; ...")
            .env("COOKIEBRIDGE_COOKIE")
            .hide_env_values(true)
            .global(true)
            .help("Cookie header of the site, as sent by the browser"))
        .arg(Arg::new("cookie-file")
            .long("cookie-file")
            .value_name("FILE")
            .global(true)
            .help("Read the cookie header from FILE ('-' for stdin)"))
        .arg(Arg::new("timeout")
            .long("timeout")
            .value_name("SECONDS")
            .global(true)
            .help("Maximum time for the whole request"))
        .arg(Arg::new("connect-timeout")
            .long("connect-timeout")
            .value_name("SECONDS")
            .global(true)
            .help("Maximum time for connection"))
        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .global(true)
            .help("Verbose output")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("silent")
            .short('s')
            .long("silent")
            .global(true)
            .help("Silent mode")
            .action(ArgAction::SetTrue))
        .subcommand(with_video_args(Command::new("info")
            .about("Fetch video metadata from the backend"))
            .arg(Arg::new("opt")
                .long("opt")
                .value_name("KEY=VALUE")
                .help("Extra field for the request body (JSON values allowed)")
                .action(ArgAction::Append))
            .arg(Arg::new("raw")
                .long("raw")
                .help("Print the response body without reformatting")
                .action(ArgAction::SetTrue)))
        .subcommand(with_video_args(Command::new("download")
            .about("Start a download and follow its progress"))
            .arg(Arg::new("no-progress")
                .long("no-progress")
                .help("Do not show progress events")
                .action(ArgAction::SetTrue)))
        .subcommand(Command::new("cookies")
            .about("Print the collected cookies as a Netscape cookie file")
            .arg(output_arg()))
}

fn with_video_args(command: Command) -> Command {
    command
        .arg(Arg::new("url")
            .help("The video URL")
            .required(true)
            .index(1))
        .arg(Arg::new("quality")
            .short('q')
            .long("quality")
            .value_name("QUALITY")
            .help("Requested quality (backend default: best)"))
        .arg(Arg::new("format")
            .short('f')
            .long("format")
            .value_name("FORMAT")
            .help("Container format (backend default: mp4)"))
        .arg(Arg::new("audio-only")
            .long("audio-only")
            .help("Only fetch the audio track")
            .action(ArgAction::SetTrue))
        .arg(output_arg())
}

fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .help("Write output to file")
}

/// Build configuration from the global arguments
fn build_config_from_args(matches: &ArgMatches) -> Result<Config> {
    let mut config = Config::default();

    if let Some(backend) = matches.get_one::<String>("backend") {
        config.backend_url = backend.clone();
    }

    config.cookie_source = cookie_source_from_args(matches)?;

    if let Some(timeout_str) = matches.get_one::<String>("timeout") {
        config.timeout = Some(StringUtils::parse_timeout(timeout_str)?);
    }

    if let Some(connect_timeout_str) = matches.get_one::<String>("connect-timeout") {
        config.connect_timeout = Some(StringUtils::parse_timeout(connect_timeout_str)?);
    }

    config.output.silent = matches.get_flag("silent");

    Ok(config)
}

/// `--cookie-file` beats a header taken from the environment, but not one
/// given explicitly on the command line alongside it.
fn cookie_source_from_args(matches: &ArgMatches) -> Result<CookieSourceConfig> {
    let header = matches.get_one::<String>("cookie");
    let file = matches.get_one::<String>("cookie-file");
    let header_explicit = matches.value_source("cookie") == Some(ValueSource::CommandLine);

    match (header, file) {
        (Some(_), Some(_)) if header_explicit => Err(BridgeError::Config(
            "--cookie and --cookie-file cannot be used together".to_string(),
        )),
        (_, Some(path)) if path == "-" => Ok(CookieSourceConfig::File(path.into())),
        (_, Some(path)) => Ok(CookieSourceConfig::File(FileUtils::expand_path(path)?)),
        (Some(header), None) => Ok(CookieSourceConfig::Header(header.clone())),
        (None, None) => Ok(CookieSourceConfig::Unavailable),
    }
}

fn apply_output_args(config: &mut Config, sub: &ArgMatches) -> Result<()> {
    if let Some(output_file) = sub.get_one::<String>("output") {
        config.output.file = Some(FileUtils::expand_path(output_file)?);
    }
    if sub.try_get_one::<bool>("no-progress").ok().flatten() == Some(&true) {
        config.output.show_progress = false;
    }
    Ok(())
}

fn required_url(sub: &ArgMatches) -> Result<String> {
    sub.get_one::<String>("url")
        .cloned()
        .ok_or_else(|| BridgeError::Config("Missing video URL".to_string()))
}

/// Collect request options; extras only apply to the info request
fn build_request_options(sub: &ArgMatches, with_extras: bool) -> Result<RequestOptions> {
    let mut options = RequestOptions::new();

    if let Some(quality) = sub.get_one::<String>("quality") {
        options.quality = Some(quality.clone());
    }
    if let Some(format) = sub.get_one::<String>("format") {
        options.format = Some(format.clone());
    }
    if sub.get_flag("audio-only") {
        options.audio_only = Some(true);
    }

    if with_extras {
        if let Some(extras) = sub.get_many::<String>("opt") {
            for extra in extras {
                let (key, value) = StringUtils::parse_option(extra)?;
                options.extra.insert(key, value);
            }
        }
    }

    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::{build_config_from_args, build_request_options, create_app};
    use crate::config::CookieSourceConfig;
    use serde_json::json;

    #[test]
    fn app_definition_is_valid() {
        create_app().debug_assert();
    }

    #[test]
    fn info_options_keep_extras() {
        let matches = create_app()
            .try_get_matches_from([
                "cookiebridge",
                "info",
                "https://youtu.be/x",
                "-q",
                "720p",
                "--opt",
                "lang=pt",
            ])
            .expect("matches");
        let (_, sub) = matches.subcommand().expect("subcommand");
        let options = build_request_options(sub, true).expect("options");
        assert_eq!(options.quality.as_deref(), Some("720p"));
        assert_eq!(options.audio_only, None);
        assert_eq!(options.extra.get("lang"), Some(&json!("pt")));
    }

    #[test]
    fn global_cookie_flag_builds_header_source() {
        let matches = create_app()
            .try_get_matches_from(["cookiebridge", "cookies", "--cookie", "sid=1"])
            .expect("matches");
        let config = build_config_from_args(&matches).expect("config");
        assert_eq!(
            config.cookie_source,
            CookieSourceConfig::Header("sid=1".to_string())
        );
    }

    #[test]
    fn cookie_and_cookie_file_conflict() {
        let matches = create_app()
            .try_get_matches_from([
                "cookiebridge",
                "--cookie",
                "sid=1",
                "--cookie-file",
                "cookies.txt",
                "cookies",
            ])
            .expect("matches");
        assert!(build_config_from_args(&matches).is_err());
    }
}
