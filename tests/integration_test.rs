use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use winswitch_engine::{
    platform::ScriptedSource, ProcessId, Scorer, SwitcherError, TokenSortScorer, WindowHandle,
    WindowRecord, WindowSwitcher,
};

const H1: WindowHandle = WindowHandle::from_raw(0x1);
const H2: WindowHandle = WindowHandle::from_raw(0x2);

fn vscode_and_notepad() -> Arc<ScriptedSource> {
    let source = Arc::new(ScriptedSource::new());
    source.set_executable(ProcessId::new(100), r"C:\VSCode\Code.exe");
    source.set_executable(ProcessId::new(200), r"C:\Windows\notepad.exe");
    source.open_window(H1, ProcessId::new(100), "Visual Studio Code");
    source.open_window(H2, ProcessId::new(200), "Notepad");
    source
}

#[test]
fn test_code_query_ranks_vscode_first() {
    let switcher = WindowSwitcher::new(vscode_and_notepad());

    let ranked = switcher.refresh_and_rank("code", 10).unwrap();

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].handle, H1);
    assert_eq!(ranked[1].handle, H2);
}

#[test]
fn test_closed_window_disappears() {
    let source = vscode_and_notepad();
    let switcher = WindowSwitcher::new(source.clone());
    switcher.refresh().unwrap();

    source.close_window(H1);
    switcher.refresh().unwrap();

    let windows = switcher.windows();
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].0, H2);
}

#[test]
fn test_reused_handle_gets_fresh_record() {
    let source = vscode_and_notepad();
    let switcher = WindowSwitcher::new(source.clone());
    switcher.refresh().unwrap();

    source.set_executable(ProcessId::new(999), "/opt/other/other");
    source.reassign(H1, ProcessId::new(999), "Other Window");
    let report = switcher.refresh().unwrap();

    assert_eq!(report.evicted_stale, 1);
    let record = switcher.snapshot().get(H1).cloned().unwrap();
    assert_eq!(
        record,
        WindowRecord::new("Other Window", "/opt/other/other", ProcessId::new(999))
    );
}

#[test]
fn test_refresh_twice_is_identical() {
    let switcher = WindowSwitcher::new(Arc::new(ScriptedSource::demo()));

    switcher.refresh().unwrap();
    let first = switcher.snapshot();
    switcher.refresh().unwrap();
    let second = switcher.snapshot();

    assert_eq!(first.entries(), second.entries());
}

#[test]
fn test_rank_is_sorted_and_bounded() {
    let switcher = WindowSwitcher::new(Arc::new(ScriptedSource::demo()));
    switcher.refresh().unwrap();
    let scorer = TokenSortScorer::new();

    for query in ["", "code", "firefox downloads", "spotify", "README Visual", "zzzz"] {
        let all = switcher.rank(query, usize::MAX);
        assert_eq!(all.len(), 6, "query {:?}", query);

        for pair in all.windows(2) {
            assert!(pair[0].score >= pair[1].score, "query {:?}", query);
        }
        for hit in &all {
            let expected = 0.9 * scorer.score(query, &hit.record.title)
                + 0.1 * scorer.score(query, &hit.record.executable_path);
            assert_eq!(hit.score, expected);
        }

        assert!(switcher.rank(query, 0).is_empty());
        assert_eq!(switcher.rank(query, 3), all[..3].to_vec());
        assert_eq!(switcher.rank(query, 6), switcher.rank(query, 6));
    }
}

#[test]
fn test_empty_cache_ranks_nothing() {
    let switcher = WindowSwitcher::new(Arc::new(ScriptedSource::new()));
    switcher.refresh().unwrap();

    assert!(switcher.rank("", 10).is_empty());
    assert!(switcher.rank("code", usize::MAX).is_empty());
}

#[test]
fn test_enumeration_failure_propagates() {
    let source = vscode_and_notepad();
    let switcher = WindowSwitcher::new(source.clone());
    switcher.refresh().unwrap();

    source.set_enumeration_failure(Some("X server unreachable"));
    let err = switcher.refresh_and_rank("code", 5).unwrap_err();
    assert!(matches!(err, SwitcherError::Enumeration(_)));

    // Ranking still serves the last published generation
    assert_eq!(switcher.rank("code", 5).len(), 2);
}

#[test]
fn test_denied_process_never_shows_up() {
    let source = vscode_and_notepad();
    source.deny_process(ProcessId::new(200), true);
    let switcher = WindowSwitcher::new(source.clone());

    for _ in 0..3 {
        let report = switcher.refresh().unwrap();
        assert_eq!(report.skipped, 1);
        assert!(switcher.rank("notepad", 10).iter().all(|r| r.handle != H2));
    }
}

#[test]
fn test_readers_never_see_partial_refresh() {
    // Two desktops that swap every refresh. Every window of desktop A is
    // owned by pid 1, every window of desktop B by pid 2, so a reader that
    // sees a mix has observed a half-built generation.
    let source = Arc::new(ScriptedSource::new());
    source.set_executable(ProcessId::new(1), "/usr/bin/a");
    source.set_executable(ProcessId::new(2), "/usr/bin/b");

    let open = |pid: u32| {
        for raw in 0..20u64 {
            source.open_window(
                WindowHandle::from_raw(u64::from(pid) * 100 + raw),
                ProcessId::new(pid),
                format!("window {}", raw),
            );
        }
    };
    let close = |pid: u32| {
        for raw in 0..20u64 {
            source.close_window(WindowHandle::from_raw(u64::from(pid) * 100 + raw));
        }
    };

    let switcher = Arc::new(WindowSwitcher::new(source.clone()));
    open(1);
    switcher.refresh().unwrap();

    let done = Arc::new(AtomicBool::new(false));
    let observed = Arc::new(AtomicUsize::new(0));
    let reader = {
        let switcher = Arc::clone(&switcher);
        let done = Arc::clone(&done);
        let observed = Arc::clone(&observed);
        thread::spawn(move || {
            while !done.load(Ordering::Acquire) {
                let ranked = switcher.rank("window 7", usize::MAX);
                assert_eq!(ranked.len(), 20);
                let owner = ranked[0].record.owner_pid;
                assert!(ranked.iter().all(|r| r.record.owner_pid == owner));
                observed.fetch_add(1, Ordering::Release);
            }
        })
    };

    // Start swapping only once the reader is running
    while observed.load(Ordering::Acquire) == 0 && !reader.is_finished() {
        thread::yield_now();
    }

    for round in 0..200 {
        let (from, to) = if round % 2 == 0 { (1, 2) } else { (2, 1) };
        close(from);
        open(to);
        switcher.refresh().unwrap();
    }

    done.store(true, Ordering::Release);
    reader.join().unwrap();
    assert!(observed.load(Ordering::Acquire) > 0);
}
