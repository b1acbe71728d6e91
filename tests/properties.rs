use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

use profile_access::lists::ListRegistry;
use profile_access::pictures::Picture;
use profile_access::resolver::{can_read, can_write};
use profile_access::{Dispatcher, MemoryAudit, Mode, Permissions, ProfileState};

const NAMES: [&str; 4] = ["alice", "bob", "carol", "dave"];
const PICTURES: [&str; 2] = ["pic1", "pic2"];
const LISTS: [&str; 3] = ["family", "work", "nil"];
const MODES: [&str; 4] = ["rw", "r-", "-w", "--"];

#[derive(Clone, Debug)]
struct Script(Vec<String>);

fn pick<'a>(g: &mut Gen, items: &[&'a str]) -> &'a str {
    g.choose(items).copied().unwrap_or_default()
}

impl Arbitrary for Script {
    fn arbitrary(g: &mut Gen) -> Self {
        let size = usize::arbitrary(g) % 60 + 1;
        let mut lines = Vec::with_capacity(size);

        for _ in 0..size {
            let line = match u8::arbitrary(g) % 12 {
                0 | 1 => format!("friendadd {}", pick(g, &NAMES)),
                2 | 3 => format!("viewby {}", pick(g, &NAMES)),
                4 => "logout".to_owned(),
                5 => format!("listadd {}", pick(g, &LISTS)),
                6 => format!(
                    "friendlist {} {}",
                    pick(g, &NAMES),
                    pick(g, &LISTS)
                ),
                7 => format!("postpicture {}", pick(g, &PICTURES)),
                8 => format!(
                    "chmod {} {} {} {}",
                    pick(g, &PICTURES),
                    pick(g, &MODES),
                    pick(g, &MODES),
                    pick(g, &MODES)
                ),
                9 => format!(
                    "chlst {} {}",
                    pick(g, &PICTURES),
                    pick(g, &LISTS)
                ),
                10 => format!(
                    "chown {} {}",
                    pick(g, &PICTURES),
                    pick(g, &NAMES)
                ),
                _ => format!("writecomments {} hi", pick(g, &PICTURES)),
            };
            lines.push(line);
        }

        Script(lines)
    }
}

#[quickcheck]
fn prop_single_viewer_and_fixed_owner(Script(lines): Script) -> bool {
    let mut d = Dispatcher::new(ProfileState::new(), MemoryAudit::new());
    let mut first_friend: Option<String> = None;
    let mut owner_viewed = false;

    for line in &lines {
        let viewer_before = d.state().session.current_viewer().map(str::to_owned);
        let outcome = match d.execute_line(line) {
            Some(outcome) => outcome,
            None => return false,
        };
        let session = &d.state().session;

        if outcome.is_success() {
            if let Some(name) = line.strip_prefix("friendadd ") {
                first_friend.get_or_insert_with(|| name.to_owned());
            }
            if let Some(name) = line.strip_prefix("viewby ") {
                // a view only starts from an empty session, and only the
                // owner opens the profile
                if viewer_before.is_some() {
                    return false;
                }
                if !owner_viewed && Some(name) != first_friend.as_deref() {
                    return false;
                }
            }
        }

        if owner_viewed && !session.owner_has_viewed() {
            return false;
        }
        owner_viewed = session.owner_has_viewed();

        if session.profile_owner() != first_friend.as_deref() {
            return false;
        }
        if let Some(viewer) = session.current_viewer() {
            if !d.state().friends.contains(viewer) {
                return false;
            }
        }
    }
    d.audit().lines().len() == lines.len()
}

fn mode(bits: u8) -> Mode {
    Mode::new(bits & 0b10 != 0, bits & 0b01 != 0)
}

fn permissions(bits: u8) -> Permissions {
    Permissions::new(mode(bits >> 4), mode(bits >> 2), mode(bits))
}

fn picture(permissions: Permissions, list: &str) -> Picture {
    Picture {
        name: "pic".to_owned(),
        owner: "alice".to_owned(),
        list: list.to_owned(),
        permissions,
        comments: Vec::new(),
    }
}

#[quickcheck]
fn prop_granting_a_flag_never_removes_access(
    bits: u8,
    extra: u8,
    bob_in_list: bool,
) -> bool {
    let mut lists = ListRegistry::new();
    if lists.create("family").is_err() {
        return false;
    }
    if bob_in_list && lists.add_member("family", "bob").is_err() {
        return false;
    }

    let bits = bits & 0b11_1111;
    let wider = bits | (1 << (extra % 6));
    let before = picture(permissions(bits), "family");
    let after = picture(permissions(wider), "family");

    ["alice", "bob", "carol"].iter().all(|viewer| {
        (!can_read(&before, viewer, &lists) || can_read(&after, viewer, &lists))
            && (!can_write(&before, viewer, &lists)
                || can_write(&after, viewer, &lists))
    })
}

#[quickcheck]
fn prop_others_scope_reaches_everyone(bits: u8) -> bool {
    let lists = ListRegistry::new();
    let others = mode(bits);
    let target = picture(
        Permissions::new(Mode::NONE, Mode::NONE, others),
        "nil",
    );

    NAMES.iter().all(|viewer| {
        can_read(&target, viewer, &lists) == others.read
            && can_write(&target, viewer, &lists) == others.write
    })
}
