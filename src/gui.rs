use eframe::egui;

pub mod about_tab;
pub mod book_tab;
pub mod config_tab;
pub mod history_tab;
pub mod popups;
pub mod search_tab;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Search,
    Book,
    History,
    About,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Search,
        Tab::Book,
        Tab::History,
        Tab::About,
        Tab::Settings,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Search => "Search",
            Tab::Book => "Your book",
            Tab::History => "History",
            Tab::About => "About",
            Tab::Settings => "Settings",
        }
    }
}

/// Show the row of tab buttons, switching `current` when one is clicked.
pub fn tab_bar(ui: &mut egui::Ui, current: &mut Tab) {
    ui.horizontal(|ui| {
        for tab in Tab::ALL {
            ui.selectable_value(current, tab, egui::RichText::new(tab.label()).size(16.0));
        }
    });
}
