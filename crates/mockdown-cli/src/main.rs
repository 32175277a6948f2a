use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use mockdown_config::Config;
use mockdown_engine::{
    io,
    model::{Button, DesignNote, MockupFile, NoteKind, TabItem, WindowStructure},
    parsing::{self, crossref},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use relative_path::RelativePathBuf;
use std::{env, io::stdout, path::PathBuf, process};

enum Preview {
    Empty,
    Failed(String),
    Window {
        structure: WindowStructure,
        selected_tab: usize,
    },
}

struct App {
    mockups_path: PathBuf,
    files: Vec<MockupFile>,
    file_list_state: ListState,
    preview: Preview,
}

impl App {
    fn new(mockups_path: PathBuf) -> Result<Self> {
        let files = io::scan_mockup_files(&mockups_path)?
            .into_iter()
            .filter_map(|path| {
                path.strip_prefix(&mockups_path)
                    .ok()
                    .and_then(|relative| RelativePathBuf::from_path(relative).ok())
            })
            .map(MockupFile::new)
            .collect::<Vec<_>>();

        let mut app = Self {
            mockups_path,
            files,
            file_list_state: ListState::default(),
            preview: Preview::Empty,
        };

        // Select first mockup if available
        if !app.files.is_empty() {
            app.file_list_state.select(Some(0));
            app.update_preview_for_selection();
        }

        Ok(app)
    }

    fn next_file(&mut self) {
        if self.files.is_empty() {
            return;
        }
        let i = match self.file_list_state.selected() {
            Some(i) => (i + 1) % self.files.len(),
            None => 0,
        };
        self.file_list_state.select(Some(i));
        self.update_preview_for_selection();
    }

    fn previous_file(&mut self) {
        if self.files.is_empty() {
            return;
        }
        let i = match self.file_list_state.selected() {
            Some(i) => {
                if i == 0 {
                    self.files.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.file_list_state.select(Some(i));
        self.update_preview_for_selection();
    }

    fn update_preview_for_selection(&mut self) {
        let Some(file) = self
            .file_list_state
            .selected()
            .and_then(|index| self.files.get(index))
        else {
            self.preview = Preview::Empty;
            return;
        };

        self.preview = match io::read_mockup(file.relative_path(), &self.mockups_path) {
            Ok(markup) => match parsing::parse(&markup) {
                Ok(structure) => Preview::Window {
                    structure,
                    selected_tab: 0,
                },
                Err(e) => Preview::Failed(format!("Invalid mockup markup: {e}")),
            },
            Err(e) => Preview::Failed(format!("Error reading mockup: {e}")),
        };
    }

    fn next_tab(&mut self) {
        if let Preview::Window {
            structure,
            selected_tab,
        } = &mut self.preview
            && !structure.tabs.is_empty()
        {
            *selected_tab = (*selected_tab + 1) % structure.tabs.len();
        }
    }

    fn previous_tab(&mut self) {
        if let Preview::Window {
            structure,
            selected_tab,
        } = &mut self.preview
            && !structure.tabs.is_empty()
        {
            *selected_tab = if *selected_tab == 0 {
                structure.tabs.len() - 1
            } else {
                *selected_tab - 1
            };
        }
    }

    fn preview_content(&self) -> Vec<String> {
        match &self.preview {
            Preview::Empty => vec!["Select a mockup to preview it".to_string()],
            Preview::Failed(message) => vec![message.clone()],
            Preview::Window {
                structure,
                selected_tab,
            } => self.render_window_content(structure, *selected_tab),
        }
    }

    fn render_window_content(
        &self,
        structure: &WindowStructure,
        selected_tab: usize,
    ) -> Vec<String> {
        let mut lines = Vec::new();

        let mut title_line = structure.title.clone();
        if !structure.global_buttons.is_empty() {
            title_line.push_str("    ");
            title_line.push_str(&render_buttons(&structure.global_buttons));
        }
        lines.push(title_line);
        lines.push("═".repeat(40));
        for note in &structure.global_design_notes {
            lines.push(render_note(note));
        }

        if structure.tabs.is_empty() {
            lines.push("(no tabs)".to_string());
            return lines;
        }

        // Tab bar with the previewed tab highlighted
        let tab_bar = structure
            .tabs
            .iter()
            .enumerate()
            .map(|(i, tab)| {
                if i == selected_tab {
                    format!("[ {} ]", tab.title)
                } else {
                    format!("  {}  ", tab.title)
                }
            })
            .collect::<Vec<_>>()
            .join("│");
        lines.push(tab_bar);
        lines.push(String::new());

        if let Some(tab) = structure.tabs.get(selected_tab) {
            render_tab_content(tab, 0, &mut lines);
        }

        let references = crossref::referenced_ids(structure);
        if !references.is_empty() {
            lines.push(String::new());
            lines.push("Linked mockups:".to_string());
            for id in references {
                let resolved = self.files.iter().any(|f| f.is_referenced_by(&id));
                let marker = if resolved { "✓" } else { "?" };
                lines.push(format!("  {marker} {id}"));
            }
        }

        lines
    }
}

fn render_buttons(buttons: &[Button]) -> String {
    buttons
        .iter()
        .map(|b| format!("[{}]", b.label))
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_note(note: &DesignNote) -> String {
    let icon = match note.kind {
        NoteKind::Note => "ℹ",
        NoteKind::Tip => "💡",
        NoteKind::Warning => "⚠",
    };
    match &note.cell {
        Some(cell) => format!(
            "{icon} {} (on {}, row {})",
            note.text, cell.header, cell.row
        ),
        None => format!("{icon} {}", note.text),
    }
}

fn render_tab_content(tab: &TabItem, depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);

    if depth > 0 {
        lines.push(format!("{indent}▸ {}", tab.title));
    }

    if !tab.buttons.is_empty() {
        lines.push(format!("{indent}{}", render_buttons(&tab.buttons)));
    }

    if let Some(content) = &tab.content
        && !content.headers.is_empty()
    {
        for row in render_grid(content.headers.as_slice(), &content.rows) {
            lines.push(format!("{indent}{row}"));
        }
    }

    for note in &tab.design_notes {
        lines.push(format!("{indent}{}", render_note(note)));
    }

    for child in &tab.children {
        lines.push(String::new());
        render_tab_content(child, depth + 1, lines);
    }
}

/// Renders an aligned text grid; `[mockup:<id>]` tokens display as `→id`.
fn render_grid(headers: &[String], rows: &[Vec<String>]) -> Vec<String> {
    let rendered_rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|cell| render_cell(cell)).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rendered_rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let mut out = Vec::new();
    out.push(format_row(headers, &widths));
    out.push(
        widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─"),
    );
    for row in &rendered_rows {
        out.push(format_row(row, &widths));
    }
    out
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" │ ")
}

fn render_cell(cell: &str) -> String {
    crossref::split_segments(cell)
        .into_iter()
        .map(|segment| match segment {
            crossref::ValueSegment::Text(text) => text,
            crossref::ValueSegment::MockupRef { id } => format!("→{id}"),
        })
        .collect()
}

fn main() -> Result<()> {
    // Determine mockups path from CLI args or config file
    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();

    let mockups_path;
    let from_config;

    if args.len() == 2 {
        // CLI argument provided - use it
        mockups_path = PathBuf::from(&args[1]);
        from_config = false;
    } else if args.len() == 1 {
        // No CLI argument - try config file
        match Config::load() {
            Ok(Some(config)) => {
                mockups_path = config.mockups_path;
                from_config = true;
            }
            Ok(None) => {
                eprintln!("Error: No mockups path provided and no config file found");
                eprintln!("Usage: {} <mockups-folder-path>", args[0]);
                eprintln!("Or create a config file at {}", config_path.display());
                process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: Failed to load config file: {e}");
                eprintln!("Usage: {} <mockups-folder-path>", args[0]);
                process::exit(1);
            }
        }
    } else {
        eprintln!("Usage: {} [mockups-folder-path]", args[0]);
        process::exit(1);
    };

    // Validate mockups directory using engine
    if let Err(e) = io::validate_mockups_dir(&mockups_path) {
        let source = if from_config {
            format!(" from config file '{}'", config_path.display())
        } else {
            String::new()
        };
        eprintln!(
            "Error: Mockups path '{}'{} is invalid: {e}",
            mockups_path.display(),
            source
        );
        process::exit(1);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app
    let mut app = App::new(mockups_path)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    <B as ratatui::backend::Backend>::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_file(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_file(),
                KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => app.next_tab(),
                KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => app.previous_tab(),
                KeyCode::Char('r') => app.update_preview_for_selection(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(f.area());

    // Mockup list panel
    let file_items: Vec<ListItem> = app
        .files
        .iter()
        .map(|file| {
            let display_text = format!("▢ {}", file.display_path());
            ListItem::new(vec![Line::from(vec![Span::raw(display_text)])])
        })
        .collect();

    let files_list = List::new(file_items)
        .block(Block::default().borders(Borders::ALL).title("Mockups"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(files_list, chunks[0], &mut app.file_list_state);

    // Preview panel
    let preview_text: Vec<Line> = app
        .preview_content()
        .iter()
        .map(|line| Line::from(vec![Span::raw(line.clone())]))
        .collect();

    let preview = Paragraph::new(preview_text)
        .block(Block::default().borders(Borders::ALL).title("Preview"))
        .wrap(ratatui::widgets::Wrap { trim: false });

    f.render_widget(preview, chunks[1]);

    // Instructions
    let help_text = Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k ↓/j: Select mockup | "),
        Span::raw("Tab/←/→: Switch tab | "),
        Span::raw("r: Reload"),
    ]);

    let help = Paragraph::new(vec![help_text]).block(Block::default());

    let bottom_chunk = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.area());

    f.render_widget(help, bottom_chunk[1]);
}
