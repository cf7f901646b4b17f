//! Slideshow command - step through an album

use dialoguer::{Select, theme::ColorfulTheme};
use std::io::IsTerminal;

use super::session_user;
use crate::model::{Photo, UserList};
use crate::session::Session;
use crate::slideshow::Slideshow;
use crate::{PhotosError, Result, output};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Next,
    Previous,
    Open,
    Quit,
}

const STEPS: [Step; 4] = [Step::Next, Step::Previous, Step::Open, Step::Quit];

impl Step {
    const fn label(self) -> &'static str {
        match self {
            Self::Next => "Next",
            Self::Previous => "Previous",
            Self::Open => "Open in viewer",
            Self::Quit => "Quit",
        }
    }
}

/// Execute the slideshow command
///
/// On a terminal the user steps through the album interactively; otherwise
/// every photo is printed once in order.
///
/// # Errors
/// Returns an error if the album does not exist or the prompt fails
pub fn execute(users: &UserList, session: &Session, album: &str, open: bool, quiet: bool) -> Result<()> {
    let user = session_user(users, session)?;
    let album = user.require_album(album)?;
    let mut show = Slideshow::new(album.photos(user.library()));
    if show.is_empty() {
        output::info(&format!("Album {} has no photos.", album.name()), quiet);
        return Ok(());
    }

    if !std::io::stdin().is_terminal() {
        for _ in 0..show.len() {
            print_slide(&show, quiet);
            show.next();
        }
        return Ok(());
    }

    let theme = ColorfulTheme::default();
    let labels: Vec<&str> = STEPS.iter().map(|s| s.label()).collect();
    loop {
        print_slide(&show, quiet);
        if open {
            open_photo(show.current());
        }
        let choice = Select::with_theme(&theme)
            .items(&labels)
            .default(0)
            .interact()
            .map_err(|e| PhotosError::InvalidInput(format!("Failed to read input: {e}")))?;
        match STEPS[choice] {
            Step::Next => {
                show.next();
            }
            Step::Previous => {
                show.previous();
            }
            Step::Open => open_photo(show.current()),
            Step::Quit => return Ok(()),
        }
    }
}

fn print_slide(show: &Slideshow<'_>, quiet: bool) {
    if let (Some(photo), Some((position, total))) = (show.current(), show.position()) {
        if quiet {
            println!("{}", photo.path());
        } else {
            println!("[{position}/{total}] {}", output::photo_line(photo, false).trim_start());
        }
    }
}

fn open_photo(photo: Option<&Photo>) {
    if let Some(photo) = photo
        && let Err(e) = open::that(photo.path())
    {
        tracing::warn!(photo = %photo.path(), error = %e, "cannot open photo");
        eprintln!("Cannot open {}: {e}", photo.path());
    }
}
