#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use taskman::commands::{Command, Shell, ShellState};
    use taskman::db::documents::MemoryCollection;
    use taskman::db::tasks::Tasks;
    use taskman::libs::config::Config;
    use taskman::libs::prompt::ScriptedPrompt;
    use taskman::libs::task::{Priority, Status};

    type TestShell = Shell<MemoryCollection, ScriptedPrompt<Cursor<Vec<u8>>>>;

    fn shell(tasks: Tasks<MemoryCollection>, lines: &[&str]) -> TestShell {
        let mut input = lines.join("\n");
        input.push('\n');
        Shell::new(tasks, Config::default(), ScriptedPrompt::new(Cursor::new(input.into_bytes())))
    }

    fn empty_repo() -> Tasks<MemoryCollection> {
        Tasks::with_store(MemoryCollection::new())
    }

    #[test]
    fn test_session_add_list_exit() {
        let mut shell = shell(
            empty_repo(),
            &[
                "help",
                "add",
                "Buy milk",
                "two litres",
                "2024-06-01",
                "high",
                "",
                "ADD",
                "Pay rent",
                "",
                "",
                "",
                "list --filter priority:high --sort title:asc",
                "frobnicate",
                "exit",
                "add",
            ],
        );

        shell.run().unwrap();

        assert_eq!(shell.state(), ShellState::Stopped);
        let all = shell.tasks().get_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].title(), "Pay rent");
        assert_eq!(all[0].priority(), Priority::Low);
        assert_eq!(all[1].title(), "Buy milk");
        assert_eq!(all[1].priority(), Priority::High);
    }

    #[test]
    fn test_session_update_complete_delete() {
        let mut tasks = empty_repo();
        let keep = tasks.create("Write report", "", None, Some("Medium")).unwrap().id().to_string();
        let drop = tasks.create("Old idea", "", None, None).unwrap().id().to_string();

        let mut shell = shell(
            tasks,
            &[
                "update",
                &keep,
                "Write final report",
                "",
                "2024-12-31",
                "",
                "in progress",
                "mark_complete",
                &keep,
                "delete",
                &drop,
                "y",
                "exit",
            ],
        );

        shell.run().unwrap();

        let all = shell.tasks().get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id().to_string(), keep);
        assert_eq!(all[0].title(), "Write final report");
        assert_eq!(all[0].status(), Status::Completed);
        assert_eq!(all[0].priority(), Priority::Medium);
    }

    #[test]
    fn test_completed_task_is_not_completed_again() {
        let mut tasks = empty_repo();
        tasks.create("Open", "", None, None).unwrap();
        let done = tasks.create("Done", "", None, None).unwrap().id().to_string();
        tasks.mark_completed(&done).unwrap();

        let mut shell = shell(tasks, &["mark_complete", &done, "list --filter status:completed", "exit"]);
        shell.run().unwrap();

        assert_eq!(shell.state(), ShellState::Stopped);
        assert_eq!(shell.tasks().get_by_status(Status::Completed).unwrap().len(), 1);
        assert_eq!(shell.tasks().get_by_status(Status::Pending).unwrap().len(), 1);
    }

    #[test]
    fn test_input_ending_mid_command_stops_shell() {
        let mut shell = shell(empty_repo(), &["add", "Half typed"]);

        shell.run().unwrap();

        assert_eq!(shell.state(), ShellState::Stopped);
        assert_eq!(shell.tasks().count().unwrap(), 0);
    }

    #[test]
    fn test_execute_single_commands() {
        let mut shell = shell(empty_repo(), &[]);

        shell.execute(Command::Help).unwrap();
        shell.execute(Command::Unknown("dance".to_string())).unwrap();
        shell.execute(Command::List(vec!["--bogus".to_string()])).unwrap();
        shell.execute(Command::Exit).unwrap();

        assert_eq!(shell.state(), ShellState::Stopped);
    }
}
