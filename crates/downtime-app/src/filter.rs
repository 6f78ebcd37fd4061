// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub fn visible<'a>(items: &'a [String], query: &str) -> Vec<&'a str> {
    if query.is_empty() {
        return items.iter().map(String::as_str).collect();
    }
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| item.to_lowercase().contains(&needle))
        .map(String::as_str)
        .collect()
}

pub fn empty_state_message(query: &str) -> String {
    if query.is_empty() {
        "No instances available".to_owned()
    } else {
        format!("No instances found matching \"{query}\"")
    }
}
