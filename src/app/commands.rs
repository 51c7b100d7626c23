use crate::app::render::{render_courses, render_homepage, render_instructors};
use crate::core::courses::CourseQueryEngine;
use crate::core::directory::InstructorDirectory;
use crate::core::homepage::{Homepage, HomepageSettings};
use crate::core::projection::HomepageView;
use crate::domain::ports::CourseApi;
use crate::utils::error::Result;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// One filter edit typed into `watch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchInput {
    Search(String),
    Instructor(Option<i64>),
    Clear,
}

pub fn parse_watch_input(line: &str) -> Option<WatchInput> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (command, rest) = match line.split_once(' ') {
        Some((command, rest)) => (command, rest),
        None => (line, ""),
    };

    match command {
        "search" | "s" => Some(WatchInput::Search(rest.to_string())),
        "instructor" | "i" => match rest.trim() {
            "" | "none" | "all" => Some(WatchInput::Instructor(None)),
            id => id.parse().ok().map(|id| WatchInput::Instructor(Some(id))),
        },
        "clear" => Some(WatchInput::Clear),
        _ => None,
    }
}

pub async fn run_home<W: Write>(
    api: Arc<dyn CourseApi>,
    settings: HomepageSettings,
    search: Option<String>,
    instructor: Option<i64>,
    out: &mut W,
) -> Result<()> {
    let page = Homepage::new(api, settings);
    page.mount().await;

    if let Some(search) = search {
        page.set_query_text(search);
    }
    if instructor.is_some() {
        page.select_instructor(instructor);
    }
    page.settled().await;

    write!(out, "{}", render_homepage(&page.view()))?;
    page.teardown();
    Ok(())
}

/// Applies stdin edits through the debounced trigger and reprints whenever
/// the homepage settles on a new view. EOF waits for the last edit to settle;
/// Ctrl-C tears down at once.
pub async fn run_watch<R, W>(
    api: Arc<dyn CourseApi>,
    settings: HomepageSettings,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let page = Homepage::new(api, settings);
    let mut revisions = page.subscribe();
    page.mount().await;

    // initial homepage
    let mut last_printed: Option<HomepageView> = None;
    print_if_changed(&page, &mut last_printed, out)?;

    let mut lines = input.lines();
    let interrupted = loop {
        tokio::select! {
            // edits go through the debouncer
            line = lines.next_line() => {
                let Some(line) = line? else { break false };
                match parse_watch_input(&line) {
                    Some(WatchInput::Search(text)) => page.set_query_text(text),
                    Some(WatchInput::Instructor(id)) => page.select_instructor(id),
                    Some(WatchInput::Clear) => {
                        page.set_query_text("");
                        page.select_instructor(None);
                    }
                    None if line.trim().is_empty() => {}
                    None => tracing::warn!("Unrecognised input: {}", line),
                }
            }
            // reprint once a refresh settles
            changed = revisions.changed() => {
                if changed.is_err() {
                    break false;
                }
                print_if_changed(&page, &mut last_printed, out)?;
            }
            _ = tokio::signal::ctrl_c() => break true,
        }
    };

    // EOF: let the last edit settle
    if !interrupted {
        page.settled().await;
        print_if_changed(&page, &mut last_printed, out)?;
    }
    page.teardown();
    Ok(())
}

fn print_if_changed<W: Write>(
    page: &Homepage,
    last_printed: &mut Option<HomepageView>,
    out: &mut W,
) -> Result<()> {
    if !page.is_settled() {
        return Ok(());
    }
    let view = page.view();
    if last_printed.as_ref() == Some(&view) {
        return Ok(());
    }
    writeln!(out, "{}", render_homepage(&view))?;
    out.flush()?;
    *last_printed = Some(view);
    Ok(())
}

pub async fn run_instructors<W: Write>(api: Arc<dyn CourseApi>, out: &mut W) -> Result<()> {
    let mut directory = InstructorDirectory::new(api);
    let instructors = directory.refresh().await;
    write!(out, "{}", render_instructors(instructors))?;
    Ok(())
}

pub async fn run_courses<W: Write>(
    api: Arc<dyn CourseApi>,
    search: Option<String>,
    instructor: Option<i64>,
    out: &mut W,
) -> Result<()> {
    let engine = CourseQueryEngine::new(api);
    let courses = engine
        .fetch_courses(search.as_deref().unwrap_or(""), instructor)
        .await;
    write!(out, "{}", render_courses(&courses))?;
    Ok(())
}

/// Delete failures are returned so the caller can block on them.
pub async fn run_delete_instructor<W: Write>(
    api: Arc<dyn CourseApi>,
    id: i64,
    out: &mut W,
) -> Result<()> {
    let mut directory = InstructorDirectory::new(api);
    directory.delete(id).await?;
    writeln!(out, "Deleted instructor {}", id)?;
    writeln!(
        out,
        "Courses taught by this instructor may also have been removed by the backend."
    )?;
    Ok(())
}
