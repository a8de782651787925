// Widgets are implemented inline in dashboard.rs using ratatui primitives
//
// The TUI uses ratatui built-in widgets:
// - Table for the endpoint list
// - Paragraph for the title bar, footer hints, and status messages
// - Block for borders and titles
// - Layout for screen organization
//
// Custom rendering includes:
// - Add-endpoint form dialog
// - Help overlay dialog
// - Color-coded health and status cells
