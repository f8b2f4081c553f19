//! Text rendering of the displayed view and the deadline list

use moddy::core::cap::format_cap;
use moddy::core::deadline_index::DeadlineIndex;
use moddy::core::models::{Course, EnrolledModule, PrereqTree, Profile};
use moddy::core::selection::{
    DisplayedView, FocusAreaView, ModuleListView, ModuleView, ProfileView,
};
use std::fmt::Write;

/// Render whatever the selection holds
#[must_use]
pub fn view(view: &DisplayedView) -> String {
    match view {
        DisplayedView::Profile(v) => profile(v),
        DisplayedView::Module(v) => module(v),
        DisplayedView::ModuleList(v) => module_list(v),
        DisplayedView::Course(c) => course(c),
        DisplayedView::FocusArea(v) => focus_area(v),
    }
}

fn module_line(out: &mut String, module: &EnrolledModule) {
    let grade = module
        .grade
        .map_or_else(|| "-".to_string(), |g| g.to_string());
    let _ = writeln!(
        out,
        "  {:<9} {:<40} {:>2} MCs  {grade}",
        module.code(),
        module.info.title,
        module.info.credits
    );
}

fn semesters(out: &mut String, profile: &Profile) {
    for (semester, modules) in profile.semesters() {
        let marker = if *semester == profile.current_semester {
            " (current)"
        } else {
            ""
        };
        let _ = writeln!(out, "\nSemester {semester}{marker}");
        for module in modules {
            module_line(out, module);
        }
    }
}

fn profile(v: &ProfileView) -> String {
    let p = &v.profile;
    let mut out = String::new();
    let _ = writeln!(out, "=== {} ===", p.name);
    let _ = writeln!(out, "Course:           {}", p.course);
    let _ = writeln!(
        out,
        "Focus area:       {}",
        p.focus_area.as_deref().unwrap_or("-")
    );
    let _ = writeln!(out, "Current semester: {}", p.current_semester);
    let _ = writeln!(out, "CAP:              {}", format_cap(v.cap));
    if p.module_count() > 0 {
        semesters(&mut out, p);
    }
    out
}

fn module(v: &ModuleView) -> String {
    let info = &v.info;
    let mut out = String::new();
    let _ = writeln!(out, "=== {} {} ===", info.code, info.title);
    let _ = writeln!(out, "Credits:       {} MCs", info.credits);
    if !info.description.is_empty() {
        let _ = writeln!(out, "{}", info.description);
    }
    if info.prerequisites != PrereqTree::None {
        let _ = writeln!(out, "Prerequisites: {}", info.prerequisites);
    }
    if !info.preclusions.is_empty() {
        let _ = writeln!(out, "Preclusions:   {}", info.preclusions.join(", "));
    }
    if let Some(met) = v.prerequisites_met {
        let _ = writeln!(
            out,
            "Prerequisites met: {}",
            if met { "yes" } else { "no" }
        );
    }
    if let Some((semester, enrolled)) = &v.enrollment {
        let _ = writeln!(out, "\nTaken in semester {semester}");
        if let Some(grade) = enrolled.grade {
            let _ = writeln!(out, "Grade: {grade}");
        }
        for task in &enrolled.deadlines {
            let _ = writeln!(out, "  - {task}");
        }
    }
    out
}

fn module_list(v: &ModuleListView) -> String {
    let mut out = format!("=== Semester {} ===\n", v.semester);
    for module in &v.modules {
        module_line(&mut out, module);
    }
    let credits: u32 = v.modules.iter().map(|m| m.info.credits).sum();
    let _ = writeln!(out, "Total: {credits} MCs");
    out
}

fn course(c: &Course) -> String {
    let mut out = format!("=== {} ===\n", c.name);
    for line in &c.requirements {
        let _ = writeln!(out, "  - {line}");
    }
    if !c.focus_areas.is_empty() {
        let _ = writeln!(out, "\nFocus areas:");
        for area in &c.focus_areas {
            let _ = writeln!(out, "  - {}", area.name);
        }
    }
    out
}

fn focus_area(v: &FocusAreaView) -> String {
    let mut out = format!("=== {} ({}) ===\n", v.area.name, v.course);
    let mut section = |title: &str, codes: &[String]| {
        if codes.is_empty() {
            return;
        }
        let _ = writeln!(out, "{title}:");
        for code in codes {
            let title = v
                .modules
                .iter()
                .find(|m| m.code.as_str().eq_ignore_ascii_case(code))
                .map_or("(not in catalog)", |m| m.title.as_str());
            let _ = writeln!(out, "  {code:<9} {title}");
        }
    };
    section("Primaries", &v.area.primaries);
    section("Electives", &v.area.electives);
    out
}

/// Render the deadline index, soonest first
#[must_use]
pub fn deadlines(index: &DeadlineIndex) -> String {
    if index.is_empty() {
        return "No tasks.".to_string();
    }
    let mut out = String::new();
    for (idx, deadline) in index.iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {deadline}", idx + 1);
    }
    out
}
