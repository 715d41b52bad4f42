//! `list [--filter status:<value>] [--filter priority:<value>] [--sort field[:order]]`
//!
//! Filters run in the store; sorting runs over the fetched tasks. Without
//! arguments the options are asked for one by one. Bad arguments never abort
//! the listing: each one is reported and skipped.

use crate::{
    db::{
        documents::DocumentStore,
        tasks::{TaskQuery, Tasks},
    },
    libs::{
        config::Config,
        messages::Message,
        prompt::Prompt,
        sort::{sort_tasks, SortField, SortOrder, TaskSort},
        task::{Priority, Status, Task},
        view::View,
    },
    msg_info, msg_print, msg_warning,
};
use anyhow::Result;
use std::str::FromStr;

pub const FILTER_FLAG: &str = "--filter";
pub const SORT_FLAG: &str = "--sort";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub query: TaskQuery,
    pub sort: Option<TaskSort>,
}

impl ListOptions {
    /// Parses `list` arguments, returning the options and one warning per
    /// skipped argument.
    pub fn parse_args(args: &[String], config: &Config) -> (Self, Vec<Message>) {
        let mut options = Self::default();
        let mut warnings = Vec::new();

        let mut i = 0;
        while i < args.len() {
            let value = args.get(i + 1);
            match (args[i].to_lowercase().as_str(), value) {
                (FILTER_FLAG, Some(filter)) => {
                    options.apply_filter(filter, config, &mut warnings);
                    i += 2;
                }
                (SORT_FLAG, Some(sort)) => {
                    options.apply_sort(sort, &mut warnings);
                    i += 2;
                }
                _ => {
                    warnings.push(Message::UnknownArgument(args[i].clone()));
                    i += 1;
                }
            }
        }

        (options, warnings)
    }

    fn apply_filter(&mut self, filter: &str, config: &Config, warnings: &mut Vec<Message>) {
        match filter.split_once(':') {
            Some((key, value)) if key.eq_ignore_ascii_case("status") => match option_value::<Status>(value) {
                Some(status) if config.accepts_status(status) => self.query.status = Some(status),
                _ => warnings.push(Message::InvalidFilterValue {
                    kind: "status",
                    value: value.to_string(),
                    available: config.status_names(),
                }),
            },
            Some((key, value)) if key.eq_ignore_ascii_case("priority") => match option_value::<Priority>(value) {
                Some(priority) if config.accepts_priority(priority) => self.query.priority = Some(priority),
                _ => warnings.push(Message::InvalidFilterValue {
                    kind: "priority",
                    value: value.to_string(),
                    available: config.priority_names(),
                }),
            },
            _ => warnings.push(Message::UnknownFilter(filter.to_string())),
        }
    }

    fn apply_sort(&mut self, sort: &str, warnings: &mut Vec<Message>) {
        let (field, order) = match sort.split_once(':') {
            Some((field, order)) => (field, Some(order)),
            None => (sort, None),
        };

        let Ok(field) = field.parse::<SortField>() else {
            warnings.push(Message::InvalidSortField {
                field: field.to_string(),
                available: SortField::names(),
            });
            return;
        };

        let order = match order.map(str::parse::<SortOrder>) {
            None => SortOrder::Desc,
            Some(Ok(order)) => order,
            Some(Err(order)) => {
                warnings.push(Message::InvalidSortOrder(order));
                SortOrder::Desc
            }
        };
        self.sort = Some(TaskSort::new(field, order));
    }

    /// Asks for each option in turn.
    pub fn prompt(prompt: &mut impl Prompt, config: &Config) -> Result<Self> {
        let mut options = Self::default();
        msg_print!(Message::ListOptionsHeader, true);

        if prompt.confirm(&Message::ConfirmFilterByStatus.to_string())? {
            let names: Vec<&str> = config.status_options.iter().map(Status::as_str).collect();
            let chosen = prompt.select(&Message::PromptSelectStatus.to_string(), &names)?;
            match chosen.and_then(|index| config.status_options.get(index)) {
                Some(status) => options.query.status = Some(*status),
                None => msg_warning!(Message::NoStatusFilterApplied),
            }
        }

        if prompt.confirm(&Message::ConfirmFilterByPriority.to_string())? {
            let names: Vec<&str> = config.priority_levels.iter().map(Priority::as_str).collect();
            let chosen = prompt.select(&Message::PromptSelectPriority.to_string(), &names)?;
            match chosen.and_then(|index| config.priority_levels.get(index)) {
                Some(priority) => options.query.priority = Some(*priority),
                None => msg_warning!(Message::NoPriorityFilterApplied),
            }
        }

        if prompt.confirm(&Message::ConfirmSortTasks.to_string())? {
            let fields: Vec<&str> = SortField::ALL.iter().map(SortField::as_str).collect();
            match prompt.select(&Message::PromptSelectSortField.to_string(), &fields)? {
                Some(index) => {
                    let orders = [SortOrder::Asc.label(), SortOrder::Desc.label()];
                    let order = match prompt.select(&Message::PromptSelectSortOrder.to_string(), &orders)? {
                        Some(0) => SortOrder::Asc,
                        _ => SortOrder::Desc,
                    };
                    options.sort = Some(TaskSort::new(SortField::ALL[index], order));
                }
                None => msg_warning!(Message::NoSortApplied),
            }
        }

        Ok(options)
    }

    /// `Status: X, Priority: Y` for the filters in use.
    pub fn filters_label(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(status) = self.query.status {
            parts.push(format!("Status: {}", status));
        }
        if let Some(priority) = self.query.priority {
            parts.push(format!("Priority: {}", priority));
        }
        (!parts.is_empty()).then(|| parts.join(", "))
    }
}

/// Filter values cannot contain spaces on the command line, so `In_Progress`
/// stands in for `In Progress`.
fn option_value<T: FromStr>(raw: &str) -> Option<T> {
    raw.replace('_', " ").parse().ok()
}

/// Lists tasks and returns them in displayed order.
pub fn cmd<S: DocumentStore>(tasks: &Tasks<S>, config: &Config, prompt: &mut impl Prompt, args: &[String]) -> Result<Vec<Task>> {
    msg_print!(Message::ListTasksHeader, true);

    let options = if args.is_empty() {
        ListOptions::prompt(prompt, config)?
    } else {
        let (options, warnings) = ListOptions::parse_args(args, config);
        for warning in warnings {
            msg_warning!(warning);
        }
        options
    };

    let mut found = tasks.find(&options.query)?;
    sort_tasks(&mut found, options.sort);

    if found.is_empty() {
        msg_warning!(Message::NoTasksMatching);
        return Ok(found);
    }

    if let Some(filters) = options.filters_label() {
        msg_print!(Message::FiltersApplied(filters));
    }
    if let Some(sort) = options.sort {
        msg_print!(Message::SortedBy(sort.to_string()));
    }
    View::tasks(&found)?;
    msg_info!(Message::TotalTasksDisplayed(found.len()));

    Ok(found)
}
