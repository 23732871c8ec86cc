use crate::entry::Runlevel;
use std::collections::BTreeSet;
use thiserror::Error;

/// Pseudo event type standing for every daemon event type without a flag.
pub const UNKNOWN: &str = "UNKNOWN";

/// Flag letter to daemon event type.
pub const EVENT_TYPES: &[(char, &str)] = &[
    ('d', "DEBUG"),
    ('i', "INFO"),
    ('n', "NOTICE"),
    ('w', "WARN"),
    ('e', "ERR"),
    ('a', "ADDRMAP"),
    ('f', "AUTHDIR_NEWDESCS"),
    ('h', "BUILDTIMEOUT_SET"),
    ('b', "BW"),
    ('c', "CIRC"),
    ('j', "CLIENTS_SEEN"),
    ('k', "DESCCHANGED"),
    ('g', "GUARD"),
    ('l', "NEWCONSENSUS"),
    ('m', "NEWDESC"),
    ('p', "NS"),
    ('q', "ORCONN"),
    ('s', "STREAM"),
    ('r', "STREAM_BW"),
    ('t', "STATUS_CLIENT"),
    ('u', "STATUS_GENERAL"),
    ('v', "STATUS_SERVER"),
];

pub const EVENT_LISTING: &str = "        d DEBUG      a ADDRMAP           k DESCCHANGED   s STREAM
        i INFO       f AUTHDIR_NEWDESCS  g GUARD         r STREAM_BW
        n NOTICE     h BUILDTIMEOUT_SET  l NEWCONSENSUS  t STATUS_CLIENT
        w WARN       b BW                m NEWDESC       u STATUS_GENERAL
        e ERR        c CIRC              p NS            v STATUS_SERVER
                     j CLIENTS_SEEN      q ORCONN
          DINWE daemon runlevel+         A All Events
          12345 watch runlevel+          X No Events
                                         U Unknown Events";

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized event flags: {flags}")]
pub struct InvalidEventFlags {
    pub flags: String,
}

pub fn is_known_event_type(event_type: &str) -> bool {
    EVENT_TYPES.iter().any(|(_, name)| *name == event_type)
}

/// Expands event flags into event types.
///
/// ```
/// use relaywatch_core::events::expand_events;
///
/// let events = expand_events("N4").unwrap();
/// let events: Vec<&str> = events.iter().map(String::as_str).collect();
/// assert_eq!(events, ["ERR", "NOTICE", "WARN", "WATCH_ERR", "WATCH_WARN"]);
/// ```
pub fn expand_events(flags: &str) -> Result<BTreeSet<String>, InvalidEventFlags> {
    let mut events = BTreeSet::new();
    let mut invalid = String::new();

    for flag in flags.chars() {
        match flag {
            'A' => {
                events = EVENT_TYPES
                    .iter()
                    .map(|(_, name)| name.to_string())
                    .chain(Runlevel::ALL.iter().map(|r| r.engine_category()))
                    .chain(std::iter::once(UNKNOWN.to_string()))
                    .collect();
                break;
            }
            'X' => {
                events.clear();
                break;
            }
            'D' | 'I' | 'N' | 'W' | 'E' => {
                if let Some(runlevel) = flag_runlevel(flag) {
                    events.extend(runlevel.and_above().map(|r| r.as_str().to_string()));
                }
            }
            '1'..='5' => {
                if let Some(runlevel) = flag_runlevel(flag) {
                    events.extend(runlevel.and_above().map(Runlevel::engine_category));
                }
            }
            'U' => {
                events.insert(UNKNOWN.to_string());
            }
            _ => match EVENT_TYPES.iter().find(|(letter, _)| *letter == flag) {
                Some((_, name)) => {
                    events.insert(name.to_string());
                }
                None => invalid.push(flag),
            },
        }
    }

    if invalid.is_empty() {
        Ok(events)
    } else {
        Err(InvalidEventFlags { flags: invalid })
    }
}

fn flag_runlevel(flag: char) -> Option<Runlevel> {
    match flag {
        'D' | '1' => Some(Runlevel::Debug),
        'I' | '2' => Some(Runlevel::Info),
        'N' | '3' => Some(Runlevel::Notice),
        'W' | '4' => Some(Runlevel::Warn),
        'E' | '5' => Some(Runlevel::Err),
        _ => None,
    }
}
