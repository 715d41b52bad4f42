//! `Display` for [`Message`]: the one place where user-facing text lives.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === SHELL MESSAGES ===
            Message::Banner { app_name, version } => {
                let title = format!("{} v{}", app_name.to_uppercase(), version);
                format!("{rule}\n{title}\n{rule}", rule = "=".repeat(60), title = title)
            }
            Message::StoreConnected(location) => format!("Connected to task store ({})", location),
            Message::StoreUnavailable(error) => {
                format!("Failed to start application. Please ensure the task store is reachable: {}", error)
            }
            Message::TaskCount(count) => format!("{} task(s) in store", count),
            Message::HelpHint => "Type 'help' for available commands or 'exit' to quit.".to_string(),
            Message::HelpText => [
                "AVAILABLE COMMANDS:",
                "------------------------------",
                "add           - Add a new task",
                "list          - List all tasks with optional filtering and sorting",
                "                Usage: list [--filter status:value] [--filter priority:value] [--sort field:order]",
                "                Examples:",
                "                  list",
                "                  list --filter status:Pending",
                "                  list --filter priority:High --sort due_date:asc",
                "                  list --sort created_at:desc",
                "mark_complete - Mark a Pending or In Progress task as completed",
                "update        - Update an existing task",
                "delete        - Delete a task",
                "help          - Show this help message",
                "exit          - Exit the application",
            ]
            .join("\n"),
            Message::UnknownCommand(command) => {
                format!("Unknown command: '{}'. Type 'help' for available commands.", command)
            }
            Message::CommandFailed(error) => format!("An error occurred: {}", error),
            Message::Goodbye => "Goodbye!".to_string(),

            // === ADD MESSAGES ===
            Message::AddTaskHeader => "ADD NEW TASK\n--------------------".to_string(),
            Message::TitleRequired => "Title is required!".to_string(),
            Message::InvalidDueDateNotSet => "Invalid date format. Due date not set.".to_string(),
            Message::InvalidPriorityDefaultLow => "Invalid priority. Set to 'Low'.".to_string(),
            Message::TaskCreated(id) => format!("Task created successfully! ID: {}", id),
            Message::TaskCreateFailed(error) => format!("Failed to create task: {}", error),

            // === LIST MESSAGES ===
            Message::ListTasksHeader => "LIST TASKS\n==============================".to_string(),
            Message::ListOptionsHeader => "Filtering and Sorting Options:".to_string(),
            Message::InvalidFilterValue { kind, value, available } => {
                format!("Invalid {} '{}'. Available: {}", kind, value, available)
            }
            Message::UnknownFilter(filter) => {
                format!("Invalid filter '{}'. Use status:<value> or priority:<value>", filter)
            }
            Message::InvalidSortField { field, available } => {
                format!("Invalid sort field '{}'. Available: {}", field, available)
            }
            Message::InvalidSortOrder(order) => format!("Invalid sort order '{}'. Using descending.", order),
            Message::UnknownArgument(arg) => format!("Unknown argument: {}", arg),
            Message::NoStatusFilterApplied => "Invalid status. No status filter applied.".to_string(),
            Message::NoPriorityFilterApplied => "Invalid priority. No priority filter applied.".to_string(),
            Message::NoSortApplied => "Invalid sort field. Default sorting will be used.".to_string(),
            Message::NoTasksMatching => "No tasks found matching the criteria.".to_string(),
            Message::FiltersApplied(filters) => format!("Filters applied: {}", filters),
            Message::SortedBy(sort) => format!("Sorted by: {}", sort),
            Message::TotalTasksDisplayed(count) => format!("Total tasks displayed: {}", count),

            // === MARK COMPLETE MESSAGES ===
            Message::MarkCompleteHeader => "MARK TASK AS COMPLETE\n==============================".to_string(),
            Message::TasksWithStatusHeader(status) => format!("All {} tasks:", status),
            Message::NoTasksWithStatus(status) => format!("No {} tasks", status),
            Message::NoIncompleteTasks => "No incomplete tasks available to mark as complete.".to_string(),
            Message::TaskAlreadyCompleted { id, title } => format!("{} - {} is already completed!", id, title),
            Message::TaskCompleted { id, title } => format!("Successfully completed task {} - {}", id, title),
            Message::TaskCompleteFailed(id) => format!("Failed to complete task {}", id),

            // === UPDATE MESSAGES ===
            Message::UpdateTaskHeader => "UPDATE TASK\n--------------------".to_string(),
            Message::CurrentTaskState => "Current task details:".to_string(),
            Message::EnterNewValues => "Enter new values (press Enter to keep current value):".to_string(),
            Message::InvalidDueDateNotUpdated => "Invalid date format. Due date not updated.".to_string(),
            Message::InvalidPriorityNotUpdated => "Invalid priority. Not updated.".to_string(),
            Message::InvalidStatusNotUpdated => "Invalid status. Not updated.".to_string(),
            Message::NoChangesMade => "No changes made.".to_string(),
            Message::TaskUpdated => "Task updated successfully!".to_string(),
            Message::TaskUpdateFailed => "Failed to update task.".to_string(),

            // === DELETE MESSAGES ===
            Message::DeleteTaskHeader => "DELETE TASK\n--------------------".to_string(),
            Message::TaskToDelete => "Task to delete:".to_string(),
            Message::TaskDeleted => "Task deleted successfully!".to_string(),
            Message::TaskDeleteFailed => "Failed to delete task.".to_string(),
            Message::DeletionCancelled => "Deletion cancelled.".to_string(),

            // === SHARED TASK MESSAGES ===
            Message::TaskIdRequired => "Task ID is required!".to_string(),
            Message::TaskNotFound(id) => format!("{} - not found.", id),
            Message::ValidationFailed(error) => format!("Validation failed: {}", error),
            Message::PriorityOptions(options) => format!("Priority options: {}", options),
            Message::StatusOptions(options) => format!("Status options: {}", options),

            // === PROMPTS ===
            Message::PromptCommand => ">".to_string(),
            Message::PromptTaskTitle => "Enter task title".to_string(),
            Message::PromptTaskDescription => "Enter description (optional)".to_string(),
            Message::PromptDueDate => "Enter due date (YYYY-MM-DD, optional)".to_string(),
            Message::PromptPriority => "Enter priority (High/Medium/Low)".to_string(),
            Message::PromptTaskId => "Task ID".to_string(),
            Message::PromptTitleEdit(current) => format!("Title [{}]", current),
            Message::PromptDescriptionEdit(current) => format!("Description [{}] ('-' to clear)", current),
            Message::PromptDueDateEdit(current) => format!("Due date [{}]", current),
            Message::PromptPriorityEdit(current) => format!("Priority [{}]", current),
            Message::PromptStatusEdit(current) => format!("Status [{}]", current),
            Message::ConfirmFilterByStatus => "Filter by status?".to_string(),
            Message::ConfirmFilterByPriority => "Filter by priority?".to_string(),
            Message::ConfirmSortTasks => "Sort tasks?".to_string(),
            Message::PromptSelectStatus => "Select status".to_string(),
            Message::PromptSelectPriority => "Select priority".to_string(),
            Message::PromptSelectSortField => "Select sort field".to_string(),
            Message::PromptSelectSortOrder => "Sort order".to_string(),
            Message::ConfirmDeleteTask => "Are you sure you want to delete this task?".to_string(),
        };

        write!(f, "{}", text)
    }
}
