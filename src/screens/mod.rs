pub mod dashboard;

// The TUI is a single dashboard screen:
// - Endpoint table (id, name, url, probe settings, last result)
// - Add-endpoint form dialog, toggled with 'a'
// - Help overlay (press '?')
// - Status bar carrying action outcomes and history URLs
//
// Check/delete/history act on the selected row; the table re-fetches
// from the server after every successful mutating action.

pub use dashboard::Dashboard;
