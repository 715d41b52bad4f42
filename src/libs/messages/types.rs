#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // === SHELL MESSAGES ===
    Banner { app_name: String, version: String },
    StoreConnected(String),        // location
    StoreUnavailable(String),      // error
    TaskCount(usize),
    HelpHint,
    HelpText,
    UnknownCommand(String),
    CommandFailed(String),         // error
    Goodbye,

    // === ADD MESSAGES ===
    AddTaskHeader,
    TitleRequired,
    InvalidDueDateNotSet,
    InvalidPriorityDefaultLow,
    TaskCreated(String),           // id
    TaskCreateFailed(String),      // error

    // === LIST MESSAGES ===
    ListTasksHeader,
    ListOptionsHeader,
    InvalidFilterValue { kind: &'static str, value: String, available: String },
    UnknownFilter(String),
    InvalidSortField { field: String, available: String },
    InvalidSortOrder(String),
    UnknownArgument(String),
    NoStatusFilterApplied,
    NoPriorityFilterApplied,
    NoSortApplied,
    NoTasksMatching,
    FiltersApplied(String),
    SortedBy(String),
    TotalTasksDisplayed(usize),

    // === MARK COMPLETE MESSAGES ===
    MarkCompleteHeader,
    TasksWithStatusHeader(String), // status
    NoTasksWithStatus(String),     // status
    NoIncompleteTasks,
    TaskAlreadyCompleted { id: String, title: String },
    TaskCompleted { id: String, title: String },
    TaskCompleteFailed(String),    // id

    // === UPDATE MESSAGES ===
    UpdateTaskHeader,
    CurrentTaskState,
    EnterNewValues,
    InvalidDueDateNotUpdated,
    InvalidPriorityNotUpdated,
    InvalidStatusNotUpdated,
    NoChangesMade,
    TaskUpdated,
    TaskUpdateFailed,

    // === DELETE MESSAGES ===
    DeleteTaskHeader,
    TaskToDelete,
    TaskDeleted,
    TaskDeleteFailed,
    DeletionCancelled,

    // === SHARED TASK MESSAGES ===
    TaskIdRequired,
    TaskNotFound(String),          // id
    ValidationFailed(String),      // error
    PriorityOptions(String),
    StatusOptions(String),

    // === PROMPTS ===
    PromptCommand,
    PromptTaskTitle,
    PromptTaskDescription,
    PromptDueDate,
    PromptPriority,
    PromptTaskId,
    PromptTitleEdit(String),       // current
    PromptDescriptionEdit(String), // current
    PromptDueDateEdit(String),     // current
    PromptPriorityEdit(String),    // current
    PromptStatusEdit(String),      // current
    ConfirmFilterByStatus,
    ConfirmFilterByPriority,
    ConfirmSortTasks,
    PromptSelectStatus,
    PromptSelectPriority,
    PromptSelectSortField,
    PromptSelectSortOrder,
    ConfirmDeleteTask,
}
