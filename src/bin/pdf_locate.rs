//! Search a JSON text layer and print highlight geometry.
//!
//! Usage:
//!   pdf_locate <text-layer.json> <pattern> [--match-case] [--whole-word]
//!              [--max-results N] [--pages A-B] [--strict] [--viewport-scale S]
//!
//! The text layer is pdf.js-style text content:
//! `{"pages": [{"items": [{"str", "width", "height", "transform"}], "height"?}]}`.
//! Set `RUST_LOG=debug` to see skipped fragments and per-page progress.

use pdf_locate::config::TextLayerOptions;
use pdf_locate::search::{SearchQuery, SearchResult, TextSearcher};
use pdf_locate::source::JsonTextLayer;
use pdf_locate::viewport::{Viewport, ViewportBox};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
struct Args {
    input: PathBuf,
    query: SearchQuery,
    strict: bool,
    viewport_scale: Option<f32>,
}

impl Args {
    fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self, String> {
        let mut positional = Vec::new();
        let mut match_case = false;
        let mut whole_word = false;
        let mut max_results = 0;
        let mut page_range = None;
        let mut strict = false;
        let mut viewport_scale = None;

        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--match-case" => match_case = true,
                "--whole-word" => whole_word = true,
                "--strict" => strict = true,
                "--max-results" => {
                    let value = iter.next().ok_or("--max-results needs a value")?;
                    max_results = value
                        .parse()
                        .map_err(|_| format!("invalid --max-results value: {}", value))?;
                },
                "--pages" => {
                    let value = iter.next().ok_or("--pages needs a value like 2-5")?;
                    page_range = Some(parse_page_range(&value)?);
                },
                "--viewport-scale" => {
                    let value = iter.next().ok_or("--viewport-scale needs a value")?;
                    let scale: f32 = value
                        .parse()
                        .map_err(|_| format!("invalid --viewport-scale value: {}", value))?;
                    viewport_scale = Some(scale);
                },
                flag if flag.starts_with("--") => return Err(format!("unknown option: {}", flag)),
                _ => positional.push(arg),
            }
        }

        if positional.len() != 2 {
            return Err("expected <text-layer.json> <pattern>".to_string());
        }
        let pattern = positional.pop().unwrap_or_default();
        let input = PathBuf::from(positional.pop().unwrap_or_default());

        let mut query = SearchQuery::new(pattern)
            .with_match_case(match_case)
            .with_whole_word(whole_word)
            .with_max_results(max_results);
        query.page_range = page_range;

        Ok(Self {
            input,
            query,
            strict,
            viewport_scale,
        })
    }
}

fn parse_page_range(value: &str) -> Result<(usize, usize), String> {
    let parse = |s: &str| {
        s.trim()
            .parse::<usize>()
            .map_err(|_| format!("invalid page range: {}", value))
    };
    match value.split_once('-') {
        Some((start, end)) => Ok((parse(start)?, parse(end)?)),
        None => {
            let page = parse(value)?;
            Ok((page, page))
        },
    }
}

#[derive(Serialize)]
struct Output<'a> {
    #[serde(flatten)]
    result: &'a SearchResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    viewport: Option<ViewportBox>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("error: {}", msg);
            eprintln!(
                "usage: pdf_locate <text-layer.json> <pattern> [--match-case] [--whole-word] \
                 [--max-results N] [--pages A-B] [--strict] [--viewport-scale S]"
            );
            std::process::exit(2);
        },
    };

    let options = if args.strict {
        TextLayerOptions::strict()
    } else {
        TextLayerOptions::lenient()
    };
    let mut layer = JsonTextLayer::open(&args.input, options)?;
    let report = TextSearcher::search_with_report(&mut layer, &args.query)?;

    let outputs: Vec<Output> = report
        .results
        .iter()
        .map(|result| {
            let viewport = args.viewport_scale.and_then(|scale| {
                let height = layer.page_height(result.page_number);
                if height.is_none() {
                    log::warn!(
                        "Page {} has no height, viewport box omitted",
                        result.page_number
                    );
                }
                height.map(|h| Viewport::new(h).with_scale(scale).convert_rect(&result.rect))
            });
            Output { result, viewport }
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&outputs)?);
    eprintln!(
        "{} matches, {} pages searched, {} fragments skipped",
        report.results.len(),
        report.pages_searched,
        report.fragments_skipped
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, String> {
        Args::parse(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_minimal() {
        let a = args(&["layer.json", "Rockstar"]).unwrap();
        assert_eq!(a.input, PathBuf::from("layer.json"));
        assert_eq!(a.query, SearchQuery::new("Rockstar"));
        assert!(!a.strict);
        assert!(a.viewport_scale.is_none());
    }

    #[test]
    fn test_parse_all_flags() {
        let a = args(&[
            "--match-case",
            "layer.json",
            "--whole-word",
            "cat",
            "--max-results",
            "5",
            "--pages",
            "2-4",
            "--strict",
            "--viewport-scale",
            "1.5",
        ])
        .unwrap();
        assert!(a.query.match_case);
        assert!(a.query.whole_word);
        assert_eq!(a.query.max_results, 5);
        assert_eq!(a.query.page_range, Some((2, 4)));
        assert_eq!(a.query.pattern, "cat");
        assert!(a.strict);
        assert_eq!(a.viewport_scale, Some(1.5));
    }

    #[test]
    fn test_parse_errors() {
        assert!(args(&["only-one"]).is_err());
        assert!(args(&["a", "b", "--bogus"]).is_err());
        assert!(args(&["a", "b", "--max-results"]).is_err());
        assert!(args(&["a", "b", "--pages", "x-2"]).is_err());
    }

    #[test]
    fn test_single_page_range() {
        assert_eq!(parse_page_range("3"), Ok((3, 3)));
        assert_eq!(parse_page_range("1-9"), Ok((1, 9)));
    }
}
