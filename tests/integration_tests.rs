//! Integration tests for passvault.
//!
//! These tests drive the library the way the binary does: a manager over a
//! store file on disk, and the shell commands on top of it.

use passvault::codec::{self, BLOCK_SIZE, FIELD_CAPACITY};
use passvault::entry::Entry;
use passvault::generator::{CharClasses, LOWER_CHARS, SPECIAL_CHARS, UPPER_CHARS, generate};
use passvault::manager::{LoadStatus, Manager};
use passvault::shell::Shell;
use passvault::shell::command::{CommandRegistry, CommandResult, ShellContext};
use passvault::shell::commands::register_all;
use std::path::PathBuf;
use tempfile::TempDir;

/// Creates a test environment with a temporary directory.
fn setup_test_env() -> (Manager, PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("passwords.dat");
    let manager = Manager::open(&db_path).expect("Failed to open store");
    (manager, db_path, temp_dir)
}

/// Creates a command registry for testing.
fn create_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    register_all(&mut registry);
    registry
}

fn reopen(path: &PathBuf) -> Manager {
    Manager::open(path).expect("Failed to reopen store")
}

fn run(registry: &CommandRegistry, manager: &mut Manager, line: &str) -> CommandResult {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let cmd = registry.get(parts[0]).expect("Unknown command");
    let mut ctx = ShellContext::new(manager).with_registry(registry);
    cmd.execute(&parts[1..], &mut ctx)
}

fn sample_entries() -> Vec<Entry> {
    vec![
        Entry::new("github", "gh-secret")
            .with_category("Work")
            .with_website("github.com")
            .with_login("dev"),
        Entry::new("email", "mail-pass")
            .with_category("Personal")
            .with_website("mail.example.com")
            .with_login("me@example.com"),
        Entry::new("bank", "b4nk!")
            .with_category("Finance")
            .with_website("bank.example")
            .with_login("me"),
    ]
}

// ============================================================================
// Manager Tests
// ============================================================================

#[test]
fn test_missing_store_starts_empty() {
    let (manager, db_path, _temp_dir) = setup_test_env();

    assert_eq!(manager.load_status(), LoadStatus::Missing);
    assert!(manager.is_empty());
    assert!(manager.categories().is_empty());
    assert!(!db_path.exists(), "Opening must not create the file");
}

#[test]
fn test_every_mutation_is_persisted() {
    let (mut manager, db_path, _temp_dir) = setup_test_env();

    for entry in sample_entries() {
        manager.add(entry).unwrap();
        assert_eq!(reopen(&db_path).entries(), manager.entries());
    }

    let changed = Entry::new("github", "new-secret").with_category("Work");
    assert!(manager.edit("github", changed).unwrap());
    assert_eq!(reopen(&db_path).entries(), manager.entries());

    assert!(manager.remove("email").unwrap());
    assert_eq!(reopen(&db_path).entries(), manager.entries());

    assert_eq!(manager.remove_category("Finance").unwrap(), 1);
    let reloaded = reopen(&db_path);
    assert_eq!(reloaded.entries(), manager.entries());
    assert_eq!(reloaded.categories(), ["Work"]);
}

#[test]
fn test_store_file_size_is_whole_blocks() {
    let (mut manager, db_path, _temp_dir) = setup_test_env();

    for entry in sample_entries() {
        manager.add(entry).unwrap();
    }

    let size = std::fs::metadata(&db_path).unwrap().len() as usize;
    assert_eq!(size, 3 * BLOCK_SIZE);
}

#[test]
fn test_categories_rebuilt_in_first_seen_order() {
    let (mut manager, db_path, _temp_dir) = setup_test_env();

    manager.add(Entry::new("a", "1").with_category("Work")).unwrap();
    manager.add(Entry::new("b", "2")).unwrap();
    manager.add(Entry::new("c", "3").with_category("Home")).unwrap();
    manager.add(Entry::new("d", "4").with_category("Work")).unwrap();

    assert_eq!(reopen(&db_path).categories(), ["Work", "Home"]);
}

#[test]
fn test_empty_category_not_persisted() {
    let (mut manager, db_path, _temp_dir) = setup_test_env();

    manager.add(Entry::new("a", "1").with_category("Work")).unwrap();
    manager.add_category("Travel");
    assert_eq!(manager.categories(), ["Work", "Travel"]);

    assert_eq!(reopen(&db_path).categories(), ["Work"]);
}

#[test]
fn test_edit_and_remove_unknown_name() {
    let (mut manager, db_path, _temp_dir) = setup_test_env();
    manager.add(Entry::new("github", "x")).unwrap();
    let before = std::fs::read(&db_path).unwrap();

    assert!(!manager.edit("gitlab", Entry::new("gitlab", "y")).unwrap());
    assert!(!manager.remove("gitlab").unwrap());

    assert_eq!(manager.len(), 1);
    assert_eq!(std::fs::read(&db_path).unwrap(), before);
}

#[test]
fn test_duplicate_names_remove_all_edit_first() {
    let (mut manager, db_path, _temp_dir) = setup_test_env();
    manager.add(Entry::new("dup", "one")).unwrap();
    manager.add(Entry::new("other", "two")).unwrap();
    manager.add(Entry::new("dup", "three")).unwrap();

    assert!(manager.edit("dup", Entry::new("dup", "edited")).unwrap());
    let passwords: Vec<&str> = manager.entries().iter().map(|e| e.password.as_str()).collect();
    assert_eq!(passwords, ["edited", "two", "three"]);

    assert!(manager.remove("dup").unwrap());
    let reloaded = reopen(&db_path);
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.entries()[0].name, "other");
}

#[test]
fn test_sorted_view_by_category_then_name() {
    let (mut manager, _db_path, _temp_dir) = setup_test_env();
    manager.add(Entry::new("zzEntry", "1").with_category("A")).unwrap();
    manager.add(Entry::new("aaEntry", "2").with_category("B")).unwrap();
    manager.add(Entry::new("mmEntry", "3").with_category("A")).unwrap();

    let names: Vec<&str> = manager
        .sorted_view(&["category", "name"])
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, ["mmEntry", "zzEntry", "aaEntry"]);

    let stored: Vec<&str> = manager.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(stored, ["zzEntry", "aaEntry", "mmEntry"]);
}

#[test]
fn test_search_matches_any_field() {
    let (mut manager, _db_path, _temp_dir) = setup_test_env();
    for entry in sample_entries() {
        manager.add(entry).unwrap();
    }

    let names: Vec<&str> = manager
        .search("example")
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, ["email", "bank"]);

    assert!(manager.search("Example").is_empty());
    assert_eq!(manager.search("").len(), 3);
}

#[test]
fn test_password_reuse_detection() {
    let (mut manager, _db_path, _temp_dir) = setup_test_env();
    manager.add(Entry::new("github", "shared")).unwrap();

    assert!(manager.is_password_used("shared"));
    assert!(!manager.is_password_used("Shared"));
}

// ============================================================================
// Store Format Tests
// ============================================================================

#[test]
fn test_long_fields_truncated_on_add() {
    let (mut manager, db_path, _temp_dir) = setup_test_env();
    let long = "w".repeat(FIELD_CAPACITY + 10);
    manager.add(Entry::new("long", "x").with_website(&long)).unwrap();

    assert_eq!(manager.entries()[0].website.len(), FIELD_CAPACITY);
    assert_eq!(reopen(&db_path).entries(), manager.entries());
}

#[test]
fn test_trailing_partial_block_ignored() {
    let (mut manager, db_path, _temp_dir) = setup_test_env();
    manager.add(Entry::new("github", "x")).unwrap();

    let mut bytes = std::fs::read(&db_path).unwrap();
    bytes.extend_from_slice(&[b'z'; 17]);
    std::fs::write(&db_path, bytes).unwrap();

    let reloaded = reopen(&db_path);
    assert_eq!(
        reloaded.load_status(),
        LoadStatus::Loaded {
            entries: 1,
            discarded_bytes: 17
        }
    );
    assert_eq!(reloaded.entries()[0].name, "github");
}

#[test]
fn test_handwritten_block_decodes() {
    let (_manager, db_path, _temp_dir) = setup_test_env();

    let mut block = [0u8; BLOCK_SIZE];
    block[..4].copy_from_slice(b"wifi");
    block[FIELD_CAPACITY..FIELD_CAPACITY + 6].copy_from_slice(b"s3cret");
    std::fs::write(&db_path, block).unwrap();

    let manager = reopen(&db_path);
    assert_eq!(manager.entries(), [Entry::new("wifi", "s3cret")]);
    assert_eq!(codec::encode(&manager.entries()[0]), block);
}

#[test]
fn test_invalid_utf8_field_survives_resave() {
    let (_manager, db_path, _temp_dir) = setup_test_env();

    let mut block = [0u8; BLOCK_SIZE];
    block[..FIELD_CAPACITY].fill(0xff);
    block[FIELD_CAPACITY] = b'p';
    std::fs::write(&db_path, block).unwrap();

    let mut manager = reopen(&db_path);
    assert!(manager.entries()[0].name.len() <= FIELD_CAPACITY);

    manager.add(Entry::new("other", "x")).unwrap();
    assert_eq!(reopen(&db_path).entries(), manager.entries());
}

// ============================================================================
// Generator Tests
// ============================================================================

#[test]
fn test_generator_respects_classes() {
    let lower_only = CharClasses::parse("l").unwrap();
    let password = generate(40, lower_only);
    assert_eq!(password.len(), 40);
    assert!(password.chars().all(|c| LOWER_CHARS.contains(c)));

    let upper_special = CharClasses::parse("us").unwrap();
    let password = generate(40, upper_special);
    assert!(
        password
            .chars()
            .all(|c| UPPER_CHARS.contains(c) || SPECIAL_CHARS.contains(c))
    );
}

#[test]
fn test_generator_empty_cases() {
    assert_eq!(generate(0, CharClasses::all()), "");
    assert_eq!(generate(16, CharClasses::none()), "");
}

#[test]
fn test_manager_generate_password() {
    let (manager, _db_path, _temp_dir) = setup_test_env();

    let password = manager.generate_password(20, true, false, false);
    assert_eq!(password.len(), 20);
    assert!(password.chars().all(|c| c.is_ascii_uppercase()));
}

// ============================================================================
// Command Tests
// ============================================================================

#[test]
fn test_add_and_show_commands() {
    let (mut manager, _db_path, _temp_dir) = setup_test_env();
    let registry = create_registry();

    let result = run(&registry, &mut manager, "add github hunter2 Work github.com dev");
    assert!(matches!(result, CommandResult::Success(_)));

    match run(&registry, &mut manager, "show github") {
        CommandResult::Success(Some(text)) => {
            assert!(text.contains("hunter2"));
            assert!(text.contains("github.com"));
            assert!(text.contains("dev"));
        }
        other => panic!("Expected entry, got {:?}", other),
    }

    let result = run(&registry, &mut manager, "show gitlab");
    assert!(matches!(result, CommandResult::Error(_)));
}

#[test]
fn test_add_generated_password() {
    let (mut manager, _db_path, _temp_dir) = setup_test_env();
    let registry = create_registry();

    let result = run(&registry, &mut manager, "add wifi -g24");
    assert!(matches!(result, CommandResult::Success(_)));
    assert_eq!(manager.find("wifi").unwrap().password.chars().count(), 24);
}

#[test]
fn test_edit_command() {
    let (mut manager, _db_path, _temp_dir) = setup_test_env();
    let registry = create_registry();
    run(&registry, &mut manager, "add github hunter2 Work");

    let result = run(&registry, &mut manager, "edit github login=dev category=Code");
    assert!(matches!(result, CommandResult::Success(_)));

    let entry = manager.find("github").unwrap();
    assert_eq!(entry.login, "dev");
    assert_eq!(entry.category, "Code");
    assert_eq!(entry.password, "hunter2");
    assert_eq!(manager.categories(), ["Work", "Code"]);
}

#[test]
fn test_remove_command() {
    let (mut manager, db_path, _temp_dir) = setup_test_env();
    let registry = create_registry();
    run(&registry, &mut manager, "add github hunter2");

    let result = run(&registry, &mut manager, "rm github");
    assert!(matches!(result, CommandResult::Success(_)));
    assert!(reopen(&db_path).is_empty());

    let result = run(&registry, &mut manager, "rm github");
    assert!(matches!(result, CommandResult::Error(_)));
}

#[test]
fn test_list_and_sort_commands() {
    let (mut manager, _db_path, _temp_dir) = setup_test_env();
    let registry = create_registry();

    match run(&registry, &mut manager, "list") {
        CommandResult::Success(Some(text)) => assert_eq!(text, "No entries stored."),
        other => panic!("Expected message, got {:?}", other),
    }

    run(&registry, &mut manager, "add zz 1 A");
    run(&registry, &mut manager, "add aa 2 B");

    match run(&registry, &mut manager, "sort name bogus") {
        CommandResult::Success(Some(text)) => {
            assert!(text.starts_with("Ignoring unknown fields: bogus"));
            assert!(text.find("aa").unwrap() < text.find("zz").unwrap());
        }
        other => panic!("Expected sorted list, got {:?}", other),
    }
}

#[test]
fn test_search_command() {
    let (mut manager, _db_path, _temp_dir) = setup_test_env();
    let registry = create_registry();
    run(&registry, &mut manager, "add github hunter2 Work");

    match run(&registry, &mut manager, "find Wor") {
        CommandResult::Success(Some(text)) => {
            assert!(text.starts_with("Search results:"));
            assert!(text.contains("github"));
        }
        other => panic!("Expected results, got {:?}", other),
    }

    match run(&registry, &mut manager, "search nothing") {
        CommandResult::Success(Some(text)) => assert_eq!(text, "No matching entries found."),
        other => panic!("Expected message, got {:?}", other),
    }
}

#[test]
fn test_category_commands() {
    let (mut manager, db_path, _temp_dir) = setup_test_env();
    let registry = create_registry();
    run(&registry, &mut manager, "add github a Work");
    run(&registry, &mut manager, "add gitlab b Work");
    run(&registry, &mut manager, "add email c Personal");

    match run(&registry, &mut manager, "category remove Work") {
        CommandResult::Success(Some(text)) => {
            assert_eq!(text, "Removed category 'Work' and 2 entries");
        }
        other => panic!("Expected message, got {:?}", other),
    }
    assert_eq!(reopen(&db_path).len(), 1);

    let result = run(&registry, &mut manager, "cat add Personal");
    assert!(matches!(result, CommandResult::Error(_)));

    match run(&registry, &mut manager, "categories") {
        CommandResult::Success(Some(text)) => assert!(text.contains("- Personal")),
        other => panic!("Expected list, got {:?}", other),
    }
}

#[test]
fn test_generate_command() {
    let (mut manager, _db_path, _temp_dir) = setup_test_env();
    let registry = create_registry();

    match run(&registry, &mut manager, "gen 10 l") {
        CommandResult::Success(Some(password)) => {
            assert_eq!(password.len(), 10);
            assert!(password.chars().all(|c| c.is_ascii_lowercase()));
        }
        other => panic!("Expected password, got {:?}", other),
    }

    let result = run(&registry, &mut manager, "gen 0");
    assert!(matches!(result, CommandResult::Error(_)));
}

#[test]
fn test_command_aliases() {
    let registry = create_registry();

    let pairs = [
        ("a", "add"),
        ("e", "edit"),
        ("del", "remove"),
        ("get", "show"),
        ("ls", "list"),
        ("find", "search"),
        ("sorted", "sort"),
        ("cat", "category"),
        ("pwgen", "generate"),
        ("?", "help"),
        ("exit", "quit"),
    ];
    for (alias, name) in pairs {
        assert_eq!(registry.get(alias).unwrap().name(), name, "alias {}", alias);
    }
}

#[test]
fn test_help_command() {
    let (mut manager, _db_path, _temp_dir) = setup_test_env();
    let registry = create_registry();

    match run(&registry, &mut manager, "help") {
        CommandResult::Success(Some(text)) => {
            for name in ["add", "edit", "remove", "search", "sort", "category"] {
                assert!(text.contains(name), "help lists {}", name);
            }
        }
        other => panic!("Expected help, got {:?}", other),
    }
}

// ============================================================================
// Shell Tests
// ============================================================================

#[test]
fn test_shell_execute_line_workflow() {
    let (mut manager, db_path, _temp_dir) = setup_test_env();
    let shell = Shell::new();

    assert!(matches!(
        shell.execute_line("add github hunter2 Work", &mut manager),
        CommandResult::Success(_)
    ));
    assert!(matches!(
        shell.execute_line("edit github password=changed", &mut manager),
        CommandResult::Success(_)
    ));
    assert_eq!(reopen(&db_path).find("github").unwrap().password, "changed");

    assert!(matches!(
        shell.execute_line("nonsense", &mut manager),
        CommandResult::Error(_)
    ));
    assert!(matches!(
        shell.execute_line("quit", &mut manager),
        CommandResult::Exit
    ));
}

#[test]
fn test_shell_names_with_spaces() {
    let (mut manager, db_path, _temp_dir) = setup_test_env();
    manager.add(Entry::new("My Bank", "pw")).unwrap();
    let shell = Shell::new();

    assert!(matches!(
        shell.execute_line("show 'My Bank'", &mut manager),
        CommandResult::Success(Some(_))
    ));
    assert!(matches!(
        shell.execute_line("edit 'My Bank' 'category=Old Stuff'", &mut manager),
        CommandResult::Success(_)
    ));
    assert_eq!(
        reopen(&db_path).find("My Bank").unwrap().category,
        "Old Stuff"
    );

    assert!(matches!(
        shell.execute_line("rm \"My Bank\"", &mut manager),
        CommandResult::Success(_)
    ));
    assert!(reopen(&db_path).is_empty());
}
