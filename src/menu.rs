//! Full-screen setup menu for choosing a demo and its parameters.

use std::error::Error;
use std::io::stdout;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::demo::Demo;
use crate::terrain::{RoughnessPreset, MAX_EXPONENT};

/// Result of running the menu
pub enum MenuResult {
    /// User chose to run with these settings
    Run(MenuConfig),
    /// User quit
    Quit,
}

/// Demo selection and parameters chosen in the menu
#[derive(Clone)]
pub struct MenuConfig {
    pub demo: Demo,
    pub seed: Option<u64>,
    pub exponent: u32,
    pub roughness: RoughnessPreset,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            demo: Demo::Landscape,
            seed: None,
            exponent: 8,
            roughness: RoughnessPreset::Normal,
        }
    }
}

/// Currently selected field
#[derive(Clone, Copy, PartialEq, Eq)]
enum MenuField {
    Demo,
    Seed,
    Exponent,
    Roughness,
    Run,
    Quit,
}

impl MenuField {
    fn next(&self) -> MenuField {
        match self {
            MenuField::Demo => MenuField::Seed,
            MenuField::Seed => MenuField::Exponent,
            MenuField::Exponent => MenuField::Roughness,
            MenuField::Roughness => MenuField::Run,
            MenuField::Run => MenuField::Quit,
            MenuField::Quit => MenuField::Demo,
        }
    }

    fn prev(&self) -> MenuField {
        match self {
            MenuField::Demo => MenuField::Quit,
            MenuField::Seed => MenuField::Demo,
            MenuField::Exponent => MenuField::Seed,
            MenuField::Roughness => MenuField::Exponent,
            MenuField::Run => MenuField::Roughness,
            MenuField::Quit => MenuField::Run,
        }
    }

    fn is_numeric(&self) -> bool {
        matches!(self, MenuField::Seed | MenuField::Exponent)
    }

    fn is_cyclable(&self) -> bool {
        matches!(self, MenuField::Demo | MenuField::Roughness)
    }
}

/// Menu state
struct Menu {
    config: MenuConfig,
    selected: MenuField,
    editing: bool,
    input_buffer: String,
}

impl Menu {
    fn new(config: MenuConfig) -> Self {
        Self {
            config,
            selected: MenuField::Demo,
            editing: false,
            input_buffer: String::new(),
        }
    }

    fn cycle_demo(&mut self, forward: bool) {
        let demos = Demo::all();
        let current_idx = demos.iter().position(|&d| d == self.config.demo).unwrap_or(0);
        let new_idx = if forward {
            (current_idx + 1) % demos.len()
        } else {
            (current_idx + demos.len() - 1) % demos.len()
        };
        self.config.demo = demos[new_idx];
    }

    fn cycle_roughness(&mut self, forward: bool) {
        let presets = RoughnessPreset::all();
        let current_idx = presets
            .iter()
            .position(|&p| p == self.config.roughness)
            .unwrap_or(0);
        let new_idx = if forward {
            (current_idx + 1) % presets.len()
        } else {
            (current_idx + presets.len() - 1) % presets.len()
        };
        self.config.roughness = presets[new_idx];
    }

    fn cycle_selected(&mut self, forward: bool) {
        match self.selected {
            MenuField::Demo => self.cycle_demo(forward),
            MenuField::Roughness => self.cycle_roughness(forward),
            _ => {}
        }
    }

    fn start_editing(&mut self) {
        if self.selected.is_numeric() {
            self.editing = true;
            self.input_buffer = match self.selected {
                MenuField::Seed => self.config.seed.map(|s| s.to_string()).unwrap_or_default(),
                MenuField::Exponent => self.config.exponent.to_string(),
                _ => String::new(),
            };
        }
    }

    fn confirm_edit(&mut self) {
        if !self.editing {
            return;
        }

        match self.selected {
            MenuField::Seed => {
                if self.input_buffer.is_empty() {
                    self.config.seed = None;
                } else if let Ok(val) = self.input_buffer.parse::<u64>() {
                    self.config.seed = Some(val);
                }
            }
            MenuField::Exponent => {
                if let Ok(val) = self.input_buffer.parse::<u32>() {
                    self.config.exponent = val.clamp(1, MAX_EXPONENT);
                }
            }
            _ => {}
        }

        self.editing = false;
        self.input_buffer.clear();
    }

    fn cancel_edit(&mut self) {
        self.editing = false;
        self.input_buffer.clear();
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Clear background
        frame.render_widget(
            Block::default().style(Style::default().bg(Color::Black)),
            area,
        );

        // Calculate centered box
        let box_width: u16 = 56;
        let box_height: u16 = 16;
        let box_x = (area.width.saturating_sub(box_width)) / 2;
        let box_y = (area.height.saturating_sub(box_height)) / 2;

        let box_area = Rect::new(box_x, box_y, box_width, box_height);

        // Main box
        let block = Block::default()
            .title(" Visualization Suite - Setup ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(box_area);
        frame.render_widget(block, box_area);

        let mut y = inner.y;

        self.render_section_header(frame, inner.x + 2, y, "Demo");
        y += 1;

        self.render_cycle_field(
            frame,
            inner.x + 3,
            y,
            "Demo:",
            self.config.demo.label(),
            MenuField::Demo,
        );
        y += 1;

        self.render_field(frame, inner.x + 3, y, "Seed:", self.format_seed(), MenuField::Seed);
        y += 2;

        self.render_section_header(frame, inner.x + 2, y, "Terrain");
        y += 1;

        self.render_field(
            frame,
            inner.x + 3,
            y,
            "Exponent:",
            self.format_exponent(),
            MenuField::Exponent,
        );
        y += 1;

        self.render_cycle_field(
            frame,
            inner.x + 3,
            y,
            "Roughness:",
            &format!("{}", self.config.roughness),
            MenuField::Roughness,
        );
        y += 2;

        // Description of currently selected cyclable field
        let desc = self.get_selected_description();
        if !desc.is_empty() {
            let desc_text = Paragraph::new(desc)
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))
                .alignment(Alignment::Center);
            frame.render_widget(desc_text, Rect::new(inner.x, y, inner.width, 1));
        }
        y += 2;

        // Separator line
        let sep_y = y;
        for x in box_area.x + 1..box_area.x + box_width - 1 {
            frame.buffer_mut()[(x, sep_y)].set_char('─').set_fg(Color::Cyan);
        }
        y += 1;

        // Buttons
        self.render_buttons(frame, inner.x, y, inner.width);

        // Help text at bottom
        let help_y = box_area.y + box_height;
        if help_y < area.height {
            let help = if self.editing {
                "Type value, Enter: Confirm, Esc: Cancel"
            } else {
                "↑↓/jk: Navigate  Enter: Edit  ←→/hl: Cycle  q: Quit"
            };
            let help_text = Paragraph::new(help)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(help_text, Rect::new(box_x, help_y, box_width, 1));
        }
    }

    fn render_section_header(&self, frame: &mut Frame, x: u16, y: u16, title: &str) {
        let style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        frame.render_widget(
            Paragraph::new(format!("─ {} ─", title)).style(style),
            Rect::new(x, y, title.len() as u16 + 6, 1),
        );
    }

    fn get_selected_description(&self) -> &'static str {
        match self.selected {
            MenuField::Demo => self.config.demo.description(),
            MenuField::Roughness => self.config.roughness.description(),
            MenuField::Exponent => "Heightfield side is 2^n + 1",
            _ => "",
        }
    }

    fn render_field(&self, frame: &mut Frame, x: u16, y: u16, label: &str, value: String, field: MenuField) {
        let is_selected = self.selected == field;
        let is_editing = self.editing && is_selected;

        // Label
        let label_style = if is_selected {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        frame.render_widget(
            Paragraph::new(format!("{:<14}", label)).style(label_style),
            Rect::new(x, y, 14, 1),
        );

        // Value box
        let display_value = if is_editing {
            format!("{}_", self.input_buffer)
        } else {
            value
        };

        let value_style = if is_selected {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        };

        frame.render_widget(
            Paragraph::new(format!(" {:<14}", display_value)).style(value_style),
            Rect::new(x + 14, y, 16, 1),
        );
    }

    fn render_cycle_field(&self, frame: &mut Frame, x: u16, y: u16, label: &str, value: &str, field: MenuField) {
        let is_selected = self.selected == field;

        // Label
        let label_style = if is_selected {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        frame.render_widget(
            Paragraph::new(format!("{:<14}", label)).style(label_style),
            Rect::new(x, y, 14, 1),
        );

        // Left arrow
        let arrow_style = if is_selected {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        frame.render_widget(
            Paragraph::new("< ").style(arrow_style),
            Rect::new(x + 14, y, 2, 1),
        );

        // Value
        let value_style = if is_selected {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        };
        frame.render_widget(
            Paragraph::new(format!(" {:<18}", value)).style(value_style),
            Rect::new(x + 16, y, 20, 1),
        );

        // Right arrow
        frame.render_widget(
            Paragraph::new(" >").style(arrow_style),
            Rect::new(x + 36, y, 2, 1),
        );
    }

    fn render_buttons(&self, frame: &mut Frame, x: u16, y: u16, width: u16) {
        let run_selected = self.selected == MenuField::Run;
        let quit_selected = self.selected == MenuField::Quit;

        let run_text = "[ Run ]";
        let quit_text = "[ Quit ]";
        let total_width = run_text.len() + 8 + quit_text.len();
        let start_x = x + (width.saturating_sub(total_width as u16)) / 2;

        let run_style = if run_selected {
            Style::default().fg(Color::Black).bg(Color::Green)
        } else {
            Style::default().fg(Color::Green)
        };
        frame.render_widget(
            Paragraph::new(run_text).style(run_style),
            Rect::new(start_x, y, run_text.len() as u16, 1),
        );

        let quit_style = if quit_selected {
            Style::default().fg(Color::Black).bg(Color::Red)
        } else {
            Style::default().fg(Color::Red)
        };
        frame.render_widget(
            Paragraph::new(quit_text).style(quit_style),
            Rect::new(start_x + run_text.len() as u16 + 8, y, quit_text.len() as u16, 1),
        );
    }

    fn format_seed(&self) -> String {
        self.config.seed.map(|s| s.to_string()).unwrap_or_else(|| "random".to_string())
    }

    fn format_exponent(&self) -> String {
        let side = (1usize << self.config.exponent) + 1;
        format!("{} ({}x{})", self.config.exponent, side, side)
    }
}

/// Run the setup menu
pub fn run_menu(initial: MenuConfig) -> Result<MenuResult, Box<dyn Error>> {
    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut menu = Menu::new(initial);
    let result;

    loop {
        // Render
        terminal.draw(|f| menu.render(f))?;

        // Handle input
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if menu.editing {
                    // Input mode
                    match key.code {
                        KeyCode::Enter => menu.confirm_edit(),
                        KeyCode::Esc => menu.cancel_edit(),
                        KeyCode::Backspace => {
                            menu.input_buffer.pop();
                        }
                        KeyCode::Char(c) if c.is_ascii_digit() => {
                            menu.input_buffer.push(c);
                        }
                        _ => {}
                    }
                } else {
                    // Navigation mode
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => {
                            result = MenuResult::Quit;
                            break;
                        }
                        KeyCode::Up | KeyCode::Char('k') => {
                            menu.selected = menu.selected.prev();
                        }
                        KeyCode::Down | KeyCode::Char('j') => {
                            menu.selected = menu.selected.next();
                        }
                        KeyCode::Left | KeyCode::Char('h') => {
                            if menu.selected.is_cyclable() {
                                menu.cycle_selected(false);
                            }
                        }
                        KeyCode::Right | KeyCode::Char('l') => {
                            if menu.selected.is_cyclable() {
                                menu.cycle_selected(true);
                            }
                        }
                        KeyCode::Enter => {
                            match menu.selected {
                                MenuField::Run => {
                                    result = MenuResult::Run(menu.config.clone());
                                    break;
                                }
                                MenuField::Quit => {
                                    result = MenuResult::Quit;
                                    break;
                                }
                                _ if menu.selected.is_cyclable() => {
                                    menu.cycle_selected(true);
                                }
                                _ => {
                                    menu.start_editing();
                                }
                            }
                        }
                        KeyCode::Tab => {
                            menu.selected = menu.selected.next();
                        }
                        KeyCode::BackTab => {
                            menu.selected = menu.selected.prev();
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    // Cleanup
    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(result)
}
