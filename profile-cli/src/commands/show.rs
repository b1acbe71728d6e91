use std::path::PathBuf;

use profile_access::{ProfileState, ProfileStorage};

use crate::models::format::Format;
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "show", about = "Print a saved profile")]
pub struct Show {
    #[clap(
        long,
        value_parser,
        default_value = ".",
        help = "Directory holding the profile files"
    )]
    pub data_dir: PathBuf,
    #[clap(long, value_enum, default_value = "text", help = "Output format")]
    pub format: Format,
}

impl Show {
    pub fn run(&self) -> Result<(), AppError> {
        let state = ProfileStorage::new(&self.data_dir)
            .load()
            .map_err(|e| AppError::ProfileLoadError(e.to_string()))?;

        let output = match self.format {
            Format::Text => render(&state),
            Format::Json => state.to_json()?,
        };
        println!("{}", output);
        Ok(())
    }
}

fn render(state: &ProfileState) -> String {
    let mut out = String::new();
    let owner = state.session.profile_owner().unwrap_or("-");
    out.push_str(&format!("Profile owner: {}\n", owner));

    out.push_str("Friends:\n");
    for friend in state.friends.iter() {
        out.push_str(&format!("\t{}\n", friend));
    }

    out.push_str("Lists:\n");
    for list in state.lists.records() {
        out.push_str(&format!("\t{}\n", list));
    }

    out.push_str("Pictures:\n");
    for picture in state.pictures.iter() {
        out.push_str(&format!(
            "\t{} ({} comments)\n",
            picture.record(),
            picture.comments.len()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_lists_everything() {
        let mut state = ProfileState::new();
        state
            .session
            .register_friend(&mut state.friends, "alice")
            .unwrap();
        state.lists.create("family").unwrap();
        state.pictures.create("pic1", "alice").unwrap();
        state.pictures.append_comment("pic1", "hi").unwrap();

        let text = render(&state);
        assert_eq!(
            text,
            "Profile owner: alice\nFriends:\n\talice\nLists:\n\tfamily\nPictures:\n\tpic1 alice nil rw -- -- (1 comments)\n"
        );
    }
}
