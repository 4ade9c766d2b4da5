use std::sync::Arc;

use leptos::{either::Either, prelude::*};

use crate::{Calculator, DirectoryState, Evaluate, KEYPAD, PagedUserDirectory, UserRecord};

const TABLE_HEADERS: [&str; 5] = ["ID", "Email", "First Name", "Last Name", "Avatar"];

/// Renders the current page of a [`PagedUserDirectory`] as a table, with previous/next controls.
///
/// While the page is loading a single "Loading..." paragraph replaces the table.
#[component]
pub fn UserDirectoryTable(
    /// The directory to render.
    directory: PagedUserDirectory,
) -> impl IntoView {
    let state = directory.state();

    let body = {
        let state = state.clone();
        move || {
            state.with(|state| match state.rows() {
                None => Either::Left(view! { <p>"Loading..."</p> }),
                Some(rows) => Either::Right(view! {
                    <table>
                        <thead>
                            <tr>
                                {TABLE_HEADERS
                                    .iter()
                                    .map(|header| view! { <th>{*header}</th> })
                                    .collect_view()}
                            </tr>
                        </thead>
                        <tbody>
                            {rows.iter().cloned().map(user_row).collect_view()}
                        </tbody>
                    </table>
                }),
            })
        }
    };

    let previous_disabled = {
        let state = state.clone();
        move || !state.with(DirectoryState::can_go_previous)
    };
    let next_disabled = {
        let state = state.clone();
        move || !state.with(DirectoryState::can_go_next)
    };
    let page_label = move || {
        state.with(|state| format!("Page {} of {}", state.current_page(), state.total_pages()))
    };
    let on_previous = {
        let directory = directory.clone();
        move |_: leptos::ev::MouseEvent| directory.go_to_previous_page()
    };
    let on_next = move |_: leptos::ev::MouseEvent| directory.go_to_next_page();

    view! {
        <div>
            <h1>"User List"</h1>
            {body}
            <nav>
                <button type="button" disabled=previous_disabled on:click=on_previous>
                    "Previous"
                </button>
                <span>{page_label}</span>
                <button type="button" disabled=next_disabled on:click=on_next>
                    "Next"
                </button>
            </nav>
        </div>
    }
}

fn user_row(user: UserRecord) -> impl IntoView {
    let alt = user.full_name();
    view! {
        <tr>
            <td>{user.id.to_string()}</td>
            <td>{user.email}</td>
            <td>{user.first_name}</td>
            <td>{user.last_name}</td>
            <td>
                <img src=user.avatar_url alt=alt />
            </td>
        </tr>
    }
}

/// Renders a [`Calculator`]: the typed input, the keypad, the last result when there is one,
/// and the history of successful evaluations.
#[component]
pub fn CalculatorPad(
    /// Evaluates the typed expression when `=` is pressed.
    evaluator: Arc<dyn Evaluate + Send + Sync>,
    /// The calculator state, a fresh one if not given.
    #[prop(optional)]
    calculator: Option<ArcRwSignal<Calculator>>,
) -> impl IntoView {
    let calculator = calculator.unwrap_or_else(|| ArcRwSignal::new(Calculator::new()));

    let display = {
        let calculator = calculator.clone();
        move || calculator.with(Calculator::display)
    };
    let keypad = KEYPAD
        .iter()
        .map(|row| {
            let buttons = row
                .iter()
                .map(|key| {
                    let key = *key;
                    let calculator = calculator.clone();
                    let evaluator = evaluator.clone();
                    let on_press = move |_: leptos::ev::MouseEvent| {
                        calculator.update(|state| {
                            *state = std::mem::take(state).press(key, &*evaluator);
                        });
                    };
                    view! {
                        <td>
                            <button type="button" on:click=on_press>
                                {key.to_string()}
                            </button>
                        </td>
                    }
                })
                .collect_view();
            view! { <tr>{buttons}</tr> }
        })
        .collect_view();
    let result = {
        let calculator = calculator.clone();
        move || {
            calculator.with(|state| {
                state
                    .result()
                    .map(|result| view! { <div>{result.to_string()}</div> })
            })
        }
    };
    let history = move || {
        calculator.with(|state| {
            state
                .history()
                .iter()
                .map(|entry| view! { <li>{entry.clone()}</li> })
                .collect_view()
        })
    };

    view! {
        <div>
            <table>
                <tbody>
                    <tr>
                        <td colspan="4">
                            <input type="text" value=display readonly=true />
                        </td>
                    </tr>
                    {keypad}
                </tbody>
            </table>
            {result}
            <div>
                <h2>"History"</h2>
                <ul>{history}</ul>
            </div>
        </div>
    }
}
