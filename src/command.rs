use std::str::FromStr;

use crate::errors::{Arity, ValidationError};

/// One parsed line of a command script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    FriendAdd { name: String },
    ViewBy { name: String },
    Logout,
    ListAdd { name: String },
    FriendList { friend: String, list: String },
    PostPicture { name: String },
    ChangeList { picture: String, list: String },
    ChangeMode {
        picture: String,
        owner: String,
        list: String,
        others: String,
    },
    ChangeOwner { picture: String, owner: String },
    ReadComments { picture: String },
    WriteComments { picture: String, text: String },
    End,
}

impl Instruction {
    pub fn name(&self) -> &'static str {
        match self {
            Instruction::FriendAdd { .. } => "friendadd",
            Instruction::ViewBy { .. } => "viewby",
            Instruction::Logout => "logout",
            Instruction::ListAdd { .. } => "listadd",
            Instruction::FriendList { .. } => "friendlist",
            Instruction::PostPicture { .. } => "postpicture",
            Instruction::ChangeList { .. } => "chlst",
            Instruction::ChangeMode { .. } => "chmod",
            Instruction::ChangeOwner { .. } => "chown",
            Instruction::ReadComments { .. } => "readcomments",
            Instruction::WriteComments { .. } => "writecomments",
            Instruction::End => "end",
        }
    }
}

fn arity(instruction: &str) -> Option<(&'static str, Arity)> {
    let entry = match instruction {
        "friendadd" => ("friendadd", Arity::Exactly(1)),
        "viewby" => ("viewby", Arity::Exactly(1)),
        "logout" => ("logout", Arity::Exactly(0)),
        "listadd" => ("listadd", Arity::Exactly(1)),
        "friendlist" => ("friendlist", Arity::Exactly(2)),
        "postpicture" => ("postpicture", Arity::Exactly(1)),
        "chlst" => ("chlst", Arity::Exactly(2)),
        "chmod" => ("chmod", Arity::Exactly(4)),
        "chown" => ("chown", Arity::Exactly(2)),
        "readcomments" => ("readcomments", Arity::Exactly(1)),
        "writecomments" => ("writecomments", Arity::AtLeast(2)),
        "end" => ("end", Arity::Exactly(0)),
        _ => return None,
    };
    Some(entry)
}

impl FromStr for Instruction {
    type Err = ValidationError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let head = tokens
            .next()
            .ok_or_else(|| ValidationError::InvalidCommand(line.to_owned()))?;
        let args: Vec<String> = tokens.map(str::to_owned).collect();

        let (name, expected) = arity(head)
            .ok_or_else(|| ValidationError::InvalidCommand(line.trim().to_owned()))?;
        if !expected.accepts(args.len()) {
            return Err(ValidationError::Arity {
                instruction: name,
                expected,
                got: args.len(),
            });
        }

        let mut args = args.into_iter();
        let mut next = || args.next().unwrap_or_default();

        let instruction = match name {
            "friendadd" => Instruction::FriendAdd { name: next() },
            "viewby" => Instruction::ViewBy { name: next() },
            "logout" => Instruction::Logout,
            "listadd" => Instruction::ListAdd { name: next() },
            "friendlist" => Instruction::FriendList {
                friend: next(),
                list: next(),
            },
            "postpicture" => Instruction::PostPicture { name: next() },
            "chlst" => Instruction::ChangeList {
                picture: next(),
                list: next(),
            },
            "chmod" => Instruction::ChangeMode {
                picture: next(),
                owner: next(),
                list: next(),
                others: next(),
            },
            "chown" => Instruction::ChangeOwner {
                picture: next(),
                owner: next(),
            },
            "readcomments" => Instruction::ReadComments { picture: next() },
            "writecomments" => {
                let picture = next();
                let text = args.collect::<Vec<_>>().join(" ");
                Instruction::WriteComments { picture, text }
            }
            "end" => Instruction::End,
            _ => {
                return Err(ValidationError::InvalidCommand(
                    line.trim().to_owned(),
                ))
            }
        };
        Ok(instruction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parses_every_instruction() {
        let script = [
            ("friendadd alice", "friendadd"),
            ("viewby alice", "viewby"),
            ("logout", "logout"),
            ("listadd family", "listadd"),
            ("friendlist bob family", "friendlist"),
            ("postpicture pic1", "postpicture"),
            ("chlst pic1 family", "chlst"),
            ("chmod pic1 rw r- --", "chmod"),
            ("chown pic1 bob", "chown"),
            ("readcomments pic1", "readcomments"),
            ("writecomments pic1 hi", "writecomments"),
            ("end", "end"),
        ];
        for (line, name) in script {
            let instruction: Instruction = line.parse().unwrap();
            assert_eq!(instruction.name(), name);
        }
    }

    #[test]
    fn comment_text_is_rejoined_with_single_spaces() {
        let instruction: Instruction =
            "writecomments  pic1   hello    big world".parse().unwrap();
        assert_eq!(
            instruction,
            Instruction::WriteComments {
                picture: "pic1".to_owned(),
                text: "hello big world".to_owned(),
            }
        );
    }

    #[test]
    fn chmod_keeps_mode_tokens_in_order() {
        let instruction: Instruction = "chmod pic1 rw r- -w".parse().unwrap();
        assert_eq!(
            instruction,
            Instruction::ChangeMode {
                picture: "pic1".to_owned(),
                owner: "rw".to_owned(),
                list: "r-".to_owned(),
                others: "-w".to_owned(),
            }
        );
    }

    #[rstest]
    #[case("friendadd", "friendadd", Arity::Exactly(1), 0)]
    #[case("friendadd alice bob", "friendadd", Arity::Exactly(1), 2)]
    #[case("logout now", "logout", Arity::Exactly(0), 1)]
    #[case("chmod pic1 rw r-", "chmod", Arity::Exactly(4), 3)]
    #[case("writecomments pic1", "writecomments", Arity::AtLeast(2), 1)]
    fn rejects_wrong_argument_count(
        #[case] line: &str,
        #[case] instruction: &'static str,
        #[case] expected: Arity,
        #[case] got: usize,
    ) {
        assert_eq!(
            line.parse::<Instruction>(),
            Err(ValidationError::Arity {
                instruction,
                expected,
                got,
            })
        );
    }

    #[rstest]
    #[case("deletepicture pic1")]
    #[case("FRIENDADD alice")]
    #[case("   ")]
    fn rejects_unknown_instructions(#[case] line: &str) {
        assert!(matches!(
            line.parse::<Instruction>(),
            Err(ValidationError::InvalidCommand(_))
        ));
    }
}
