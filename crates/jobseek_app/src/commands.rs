//! Line commands typed at the prompt.

use jobseek_core::{
    AppState, AuthStatus, Facet, FilterEdit, FilterParseError, FilterRemoval, Msg,
};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  search <text>                 edit the search box (empty clears it)
  on|off|toggle <facet>         remote, part-time, seasonal, diaspora, public-sector
  edit                          open the filter panel
  set <field> <value>           location, category, type, experience, company,
                                salary-min, salary-max, currency, posted, sort
                                (`any` clears single-value fields)
  unset location|category <v>   drop one value from the draft
  apply | cancel                commit or discard the draft
  remove <field> [value]        clear one active filter immediately
  reset                         clear every filter
  page <n> | next | prev        paging
  login <user> <role> <token>   role: seeker, employer, admin
  logout | help | quit";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{command}` needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },
    #[error("`{0}` is not a valid number")]
    InvalidNumber(String),
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error(transparent)]
    Filter(#[from] FilterParseError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Msg),
    /// Flip a facet relative to the committed filters.
    ToggleFacet(Facet),
    NextPage,
    PrevPage,
    Help,
    Quit,
}

impl Command {
    /// Resolves commands that depend on the current state into a message.
    pub fn into_msg(self, state: &AppState) -> Option<Msg> {
        match self {
            Command::Dispatch(msg) => Some(msg),
            Command::ToggleFacet(facet) => Some(Msg::FacetToggled {
                facet,
                enabled: !state.panel().committed().has_facet(facet),
            }),
            Command::NextPage => state.page().checked_add(1).map(Msg::PageChanged),
            Command::PrevPage => (state.page() > 1).then(|| Msg::PageChanged(state.page() - 1)),
            Command::Help | Command::Quit => None,
        }
    }
}

/// Parses one input line. Blank lines parse to `None`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let (word, rest) = split_word(trimmed);

    let command = match word.to_ascii_lowercase().as_str() {
        // The search text keeps inner whitespace exactly as typed.
        "search" | "/" => Command::Dispatch(Msg::QueryTextChanged(rest.to_string())),
        "on" => facet_msg(rest, true)?,
        "off" => facet_msg(rest, false)?,
        "toggle" => Command::ToggleFacet(required(rest, "toggle", "a facet")?.parse()?),
        "edit" => Command::Dispatch(Msg::FilterPanelOpened),
        "set" => Command::Dispatch(Msg::PendingFilterChanged(parse_set(rest)?)),
        "unset" => Command::Dispatch(Msg::PendingFilterChanged(parse_unset(rest)?)),
        "apply" => Command::Dispatch(Msg::PendingFiltersApplied),
        "cancel" => Command::Dispatch(Msg::FilterPanelCancelled),
        "remove" | "rm" => Command::Dispatch(Msg::FilterRemoved(parse_removal(rest)?)),
        "reset" | "clear" => Command::Dispatch(Msg::FiltersReset),
        "page" => Command::Dispatch(Msg::PageChanged(number(required(
            rest, "page", "a page number",
        )?)?)),
        "next" => Command::NextPage,
        "prev" => Command::PrevPage,
        "login" => Command::Dispatch(Msg::AuthChanged(parse_login(rest)?)),
        "logout" => Command::Dispatch(Msg::AuthChanged(AuthStatus::Anonymous)),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn split_word(input: &str) -> (&str, &str) {
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (input, ""),
    }
}

fn required<'a>(
    value: &'a str,
    command: &'static str,
    what: &'static str,
) -> Result<&'a str, CommandError> {
    let value = value.trim();
    if value.is_empty() {
        Err(CommandError::MissingArgument { command, what })
    } else {
        Ok(value)
    }
}

fn number<T: std::str::FromStr>(value: &str) -> Result<T, CommandError> {
    value
        .trim()
        .parse()
        .map_err(|_| CommandError::InvalidNumber(value.trim().to_string()))
}

fn is_any(value: &str) -> bool {
    value.eq_ignore_ascii_case("any")
}

/// `any` maps to `None`, everything else through `parse`.
fn optional<T, F>(value: &str, parse: F) -> Result<Option<T>, CommandError>
where
    F: FnOnce(&str) -> Result<T, CommandError>,
{
    if is_any(value) {
        Ok(None)
    } else {
        parse(value).map(Some)
    }
}

fn facet_msg(rest: &str, enabled: bool) -> Result<Command, CommandError> {
    let facet = required(rest, if enabled { "on" } else { "off" }, "a facet")?.parse()?;
    Ok(Command::Dispatch(Msg::FacetToggled { facet, enabled }))
}

fn parse_set(rest: &str) -> Result<FilterEdit, CommandError> {
    let (field, value) = split_word(required(rest, "set", "a field and a value")?);
    let value = required(value, "set", "a value")?;
    let edit = match field.to_ascii_lowercase().as_str() {
        "location" | "city" => FilterEdit::AddLocation(value.to_string()),
        "category" => FilterEdit::AddCategory(value.to_string()),
        "type" => FilterEdit::JobType(optional(value, |v| Ok(v.parse()?))?),
        "experience" => FilterEdit::Experience(optional(value, |v| Ok(v.parse()?))?),
        "company" => FilterEdit::Company(if is_any(value) {
            String::new()
        } else {
            value.to_string()
        }),
        "salary-min" => FilterEdit::SalaryMin(optional(value, number)?),
        "salary-max" => FilterEdit::SalaryMax(optional(value, number)?),
        "currency" => FilterEdit::Currency(value.parse()?),
        "posted" => FilterEdit::PostedWithin(optional(value, |v| Ok(v.parse()?))?),
        "sort" => FilterEdit::Sort(value.parse()?),
        other => match other.parse::<Facet>() {
            Ok(facet) => FilterEdit::Facet(facet, parse_switch(value)?),
            Err(_) => return Err(CommandError::UnknownField(other.to_string())),
        },
    };
    Ok(edit)
}

fn parse_switch(value: &str) -> Result<bool, CommandError> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        _ => Err(CommandError::MissingArgument {
            command: "set",
            what: "on or off",
        }),
    }
}

fn parse_unset(rest: &str) -> Result<FilterEdit, CommandError> {
    let (field, value) = split_word(required(rest, "unset", "a field and a value")?);
    let value = required(value, "unset", "a value")?.to_string();
    match field.to_ascii_lowercase().as_str() {
        "location" | "city" => Ok(FilterEdit::RemoveLocation(value)),
        "category" => Ok(FilterEdit::RemoveCategory(value)),
        other => Err(CommandError::UnknownField(other.to_string())),
    }
}

fn parse_removal(rest: &str) -> Result<FilterRemoval, CommandError> {
    let (field, value) = split_word(required(rest, "remove", "a field")?);
    let value = value.trim();
    let entry = (!value.is_empty()).then(|| value.to_string());
    let removal = match field.to_ascii_lowercase().as_str() {
        "query" | "search" => FilterRemoval::Query,
        "location" | "city" => FilterRemoval::Location(entry),
        "category" => FilterRemoval::Category(entry),
        "type" => FilterRemoval::JobType,
        "salary" => FilterRemoval::Salary,
        "experience" => FilterRemoval::Experience,
        "company" => FilterRemoval::Company,
        "posted" => FilterRemoval::PostedWithin,
        "sort" => FilterRemoval::Sort,
        other => match other.parse::<Facet>() {
            Ok(facet) => FilterRemoval::Facet(facet),
            Err(_) => return Err(CommandError::UnknownField(other.to_string())),
        },
    };
    Ok(removal)
}

fn parse_login(rest: &str) -> Result<AuthStatus, CommandError> {
    let mut parts = rest.split_whitespace();
    let missing = || CommandError::MissingArgument {
        command: "login",
        what: "<user> <role> <token>",
    };
    let user_id = parts.next().ok_or_else(missing)?.to_string();
    let role = parts.next().ok_or_else(missing)?.parse()?;
    let token = parts.next().ok_or_else(missing)?.to_string();
    Ok(AuthStatus::Authenticated {
        user_id,
        role,
        token,
    })
}

#[cfg(test)]
mod tests {
    use jobseek_core::{update, JobType, PageInfo, ResultPage, Role};
    use pretty_assertions::assert_eq;

    use super::*;

    fn dispatched(line: &str) -> Msg {
        match parse(line) {
            Ok(Some(Command::Dispatch(msg))) => msg,
            other => panic!("`{line}` parsed to {other:?}"),
        }
    }

    fn run(state: AppState, line: &str) -> AppState {
        let msg = parse(line)
            .unwrap()
            .and_then(|command| command.into_msg(&state))
            .unwrap();
        update(state, msg).0
    }

    #[test]
    fn search_keeps_text_as_typed() {
        assert_eq!(
            dispatched("search senior  rust dev"),
            Msg::QueryTextChanged("senior  rust dev".into())
        );
        assert_eq!(dispatched("search"), Msg::QueryTextChanged(String::new()));
        assert_eq!(parse("   "), Ok(None));
    }

    #[test]
    fn set_builds_pending_edits() {
        assert_eq!(
            dispatched("set location Shkoder"),
            Msg::PendingFilterChanged(FilterEdit::AddLocation("Shkoder".into()))
        );
        assert_eq!(
            dispatched("set type contract"),
            Msg::PendingFilterChanged(FilterEdit::JobType(Some(JobType::Contract)))
        );
        assert_eq!(
            dispatched("set salary-min any"),
            Msg::PendingFilterChanged(FilterEdit::SalaryMin(None))
        );
        assert_eq!(
            dispatched("set remote on"),
            Msg::PendingFilterChanged(FilterEdit::Facet(Facet::Remote, true))
        );
        assert_eq!(
            parse("set salary-max lots"),
            Err(CommandError::InvalidNumber("lots".into()))
        );
        assert!(matches!(
            parse("set colour blue"),
            Err(CommandError::UnknownField(_))
        ));
    }

    #[test]
    fn remove_accepts_optional_entry() {
        assert_eq!(
            dispatched("remove location Tirana"),
            Msg::FilterRemoved(FilterRemoval::Location(Some("Tirana".into())))
        );
        assert_eq!(
            dispatched("remove category"),
            Msg::FilterRemoved(FilterRemoval::Category(None))
        );
        assert_eq!(
            dispatched("remove seasonal"),
            Msg::FilterRemoved(FilterRemoval::Facet(Facet::Seasonal))
        );
    }

    #[test]
    fn login_requires_three_parts() {
        assert_eq!(
            dispatched("login u7 seeker abc"),
            Msg::AuthChanged(AuthStatus::Authenticated {
                user_id: "u7".into(),
                role: Role::Seeker,
                token: "abc".into(),
            })
        );
        assert!(matches!(
            parse("login u7 seeker"),
            Err(CommandError::MissingArgument { command: "login", .. })
        ));
    }

    #[test]
    fn toggle_and_paging_resolve_against_state() {
        let state = AppState::new();
        let toggle = parse("toggle remote").unwrap().unwrap();
        assert_eq!(
            toggle.into_msg(&state),
            Some(Msg::FacetToggled {
                facet: Facet::Remote,
                enabled: true,
            })
        );
        assert_eq!(
            Command::NextPage.into_msg(&state),
            Some(Msg::PageChanged(2))
        );
        assert_eq!(Command::PrevPage.into_msg(&state), None);
        assert_eq!(parse("QUIT"), Ok(Some(Command::Quit)));
        assert!(matches!(parse("dance"), Err(CommandError::Unknown(_))));
    }

    #[test]
    fn unloaded_page_jump_does_not_move_the_cursor() {
        let state = run(AppState::new(), "page 4294967295");
        assert!(state.is_loading());
        assert_eq!(state.page(), 1);
        assert_eq!(
            Command::NextPage.into_msg(&state),
            Some(Msg::PageChanged(2))
        );
    }

    #[test]
    fn next_stops_at_the_largest_page_number() {
        let (state, _) = update(AppState::new(), Msg::Opened);
        let seq = state.latest_listings_seq();
        let (state, _) = update(
            state,
            Msg::ListingsLoaded {
                seq,
                result: Ok(ResultPage {
                    listings: Vec::new(),
                    page_info: PageInfo {
                        page: u32::MAX,
                        total_pages: u32::MAX,
                        ..PageInfo::default()
                    },
                }),
            },
        );
        assert_eq!(state.page(), u32::MAX);
        assert_eq!(Command::NextPage.into_msg(&state), None);
        assert_eq!(
            Command::PrevPage.into_msg(&state),
            Some(Msg::PageChanged(u32::MAX - 1))
        );
    }
}
