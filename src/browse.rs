use std::time::Duration;

use anyhow::bail;
use indicatif::ProgressBar;
use inquire::{InquireError, Select, Text};

use crate::render;
use crate::session::{Chip, Session};

enum Action {
    Search,
    SearchV0,
    LoadMore,
    SetGender,
    SetCategory,
    RemoveChip(Chip),
    SimilarByText,
    SimilarByImage,
    ToggleOpenai,
    Quit,
}

fn with_spinner<T>(message: &str, f: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));
    let result = f();
    spinner.finish_and_clear();
    result
}

/// Prompt wrapper mapping Esc/Ctrl-C to `None`.
fn prompt_text(message: &str) -> anyhow::Result<Option<String>> {
    match Text::new(message).prompt() {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => Ok(None),
        Err(err) => bail!("prompt failed: {err}"),
    }
}

/// Asks for a card number from the visible page, returns the product id.
fn pick_product(session: &Session) -> anyhow::Result<Option<u64>> {
    let count = session.page.products.len();
    if count == 0 {
        println!("nothing to pick from");
        return Ok(None);
    }

    let Some(answer) = prompt_text(&format!("Card number (1-{count}):"))? else {
        return Ok(None);
    };

    match answer.trim().parse::<usize>() {
        Ok(n) if n >= 1 && n <= count => Ok(Some(session.page.products[n - 1].product_id)),
        _ => {
            println!("no card #{answer}");
            Ok(None)
        }
    }
}

fn menu(session: &Session) -> Vec<(String, Action)> {
    let mut items: Vec<(String, Action)> = vec![
        ("Search".to_string(), Action::Search),
        ("Search (v0 text match)".to_string(), Action::SearchV0),
        ("Load more products".to_string(), Action::LoadMore),
        ("Set gender filter".to_string(), Action::SetGender),
        ("Set category filter".to_string(), Action::SetCategory),
    ];

    for chip in session.chips() {
        items.push((format!("Remove {}", chip.label()), Action::RemoveChip(chip)));
    }

    items.push((
        "View similar by text…".to_string(),
        Action::SimilarByText,
    ));
    items.push((
        "View similar by image…".to_string(),
        Action::SimilarByImage,
    ));
    items.push((
        format!(
            "Use OpenAI embeddings: {}",
            if session.openai { "on" } else { "off" }
        ),
        Action::ToggleOpenai,
    ));
    items.push(("Quit".to_string(), Action::Quit));

    items
}

/// Interactive catalog session: render, prompt, dispatch one session
/// operation, repeat.
pub fn run(session: &mut Session) -> anyhow::Result<()> {
    with_spinner("loading products", || session.initial_load());

    loop {
        let width = render::terminal_width();
        println!();
        println!(
            "{}",
            render::render_view(
                &session.page,
                &session.chips(),
                session.last_error.as_deref(),
                &session.search_text,
                width,
            )
        );

        let items = menu(session);
        let labels: Vec<String> = items.iter().map(|(label, _)| label.clone()).collect();

        let choice = match Select::new("Action:", labels).raw_prompt() {
            Ok(choice) => choice.index,
            Err(InquireError::OperationCanceled)
            | Err(InquireError::OperationInterrupted) => return Ok(()),
            Err(err) => bail!("prompt failed: {err}"),
        };

        match &items[choice].1 {
            Action::Search => {
                if let Some(text) = prompt_text("Search:")? {
                    with_spinner("searching", || session.search(&text));
                }
            }
            Action::SearchV0 => {
                if let Some(text) = prompt_text("Search (v0):")? {
                    with_spinner("searching", || session.search_v0(&text));
                }
            }
            Action::LoadMore => {
                with_spinner("loading products", || session.load_more());
            }
            Action::SetGender => {
                if let Some(gender) = prompt_text("Gender:")? {
                    with_spinner("loading products", || session.set_gender(gender.trim()));
                }
            }
            Action::SetCategory => {
                if let Some(category) = prompt_text("Category:")? {
                    with_spinner("loading products", || {
                        session.set_category(category.trim())
                    });
                }
            }
            Action::RemoveChip(chip) => {
                let chip = chip.clone();
                with_spinner("loading products", || session.remove_chip(&chip));
            }
            Action::SimilarByText => {
                if let Some(id) = pick_product(session)? {
                    with_spinner("searching similar", || session.similar_by_text(id));
                }
            }
            Action::SimilarByImage => {
                if let Some(id) = pick_product(session)? {
                    with_spinner("searching similar", || session.similar_by_image(id));
                }
            }
            Action::ToggleOpenai => {
                let openai = !session.openai;
                session.set_openai(openai);
            }
            Action::Quit => return Ok(()),
        }
    }
}
