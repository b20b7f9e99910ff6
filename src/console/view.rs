use std::fmt::Write;

use crate::{
    engine::{Session, WaypointList},
    entities::{Field, RouteResult, Suggestion, TravelMode},
};

pub fn suggestions(field: Field, items: &[Suggestion]) -> String {
    if items.is_empty() {
        return format!("no {} suggestions", field.name());
    }

    let mut out = format!("{} suggestions:", field.name());
    for (index, item) in items.iter().enumerate() {
        let _ = write!(out, "\n  {}. {}", index + 1, item.full_address);
    }

    out
}

pub fn waypoints(list: &WaypointList) -> String {
    if list.is_empty() {
        return "no waypoints".into();
    }

    let mut out = String::new();

    match list.start() {
        Some(start) => {
            let _ = write!(out, "start: {} ({})", start.display_name, start.coordinates);
        }
        None => out.push_str("start: -"),
    }

    for (index, stop) in list.stops().iter().enumerate() {
        let _ = write!(
            out,
            "\nstop {}: {} ({})",
            index + 1,
            stop.display_name,
            stop.coordinates
        );
    }

    out
}

pub fn summary(route: Option<&RouteResult>, mode: TravelMode) -> String {
    match route {
        Some(route) => {
            let summary = route.summary();
            format!(
                "{} | distance {} | duration {}",
                mode.label(),
                summary.distance,
                summary.duration
            )
        }
        None => format!("{} | no route", mode.label()),
    }
}

pub fn modes(current: TravelMode) -> String {
    TravelMode::ALL
        .iter()
        .map(|mode| {
            let marker = if *mode == current { "*" } else { " " };
            format!("{} {:<11} {}", marker, mode.profile(), mode.label())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn session(session: &Session) -> String {
    format!(
        "{}\n{}",
        waypoints(session.waypoints()),
        summary(session.route(), session.travel_mode())
    )
}
