//! Reducer - pure function: (state, action) -> (changed, effects)
//!
//! All state mutations happen here. Requests are only described, as
//! [`Effect`]s; their outcomes come back as `*Did*` actions.
//!
//! Stale results are dropped on arrival:
//! - list results must carry the latest issued sequence number
//! - lookup results must carry the current view epoch

use crate::action::Action;
use crate::effect::{DispatchResult, Effect};
use crate::form::CreateForm;
use crate::item::{Item, ItemId};
use crate::route::Route;
use crate::state::{AppState, Lookup, Notice, WithdrawStatus};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Navigation =====
        Action::NavigateTo(route) => {
            state.notice = None;
            DispatchResult::changed_with_many(navigate(state, route))
        }

        // ===== Item list =====
        Action::ItemsFetch => DispatchResult::changed_with(fetch_items(state, false)),

        Action::ItemsDidLoad { seq, items } => {
            if !state.list.seq.is_latest(seq) {
                tracing::debug!(seq, latest = state.list.seq.current(), "dropping stale list");
                return DispatchResult::unchanged();
            }
            state.cache.replace_all(items);
            state.list.is_loading = false;
            clamp_selection(state);
            DispatchResult::changed()
        }

        Action::ItemsDidError { seq, error } => {
            if !state.list.seq.is_latest(seq) {
                return DispatchResult::unchanged();
            }
            state.list.is_loading = false;
            state.notice = Some(Notice::error(format!("Could not load items: {}", error)));
            DispatchResult::changed()
        }

        Action::ItemsSelect(index) => {
            let last = state.cache.len().saturating_sub(1);
            let index = index.min(last);
            if state.list.selected == index {
                return DispatchResult::unchanged();
            }
            state.list.selected = index;
            DispatchResult::changed()
        }

        // ===== Search =====
        Action::SearchOpen => {
            if state.list.searching {
                return DispatchResult::unchanged();
            }
            state.list.searching = true;
            DispatchResult::changed()
        }

        Action::SearchQueryChange(query) => {
            if state.list.filter == query {
                return DispatchResult::unchanged();
            }
            state.list.filter = query;
            state.list.selected = 0;
            DispatchResult::changed_with(fetch_items(state, true))
        }

        Action::SearchClose => {
            if !state.list.searching {
                return DispatchResult::unchanged();
            }
            state.list.searching = false;
            DispatchResult::changed()
        }

        Action::SearchClear => {
            state.list.searching = false;
            if state.list.filter.is_empty() {
                return DispatchResult::changed();
            }
            state.list.filter.clear();
            state.list.selected = 0;
            DispatchResult::changed_with(fetch_items(state, false))
        }

        // ===== Create form =====
        Action::FormFieldChange(field, value) => {
            state.form.set(field, value);
            DispatchResult::changed()
        }

        Action::FormFocus(field) => {
            if state.form.focus == field {
                return DispatchResult::unchanged();
            }
            state.form.focus = field;
            DispatchResult::changed()
        }

        Action::FormSubmit => match state.form.validate() {
            Err(error) => {
                state.form.focus = error.field();
                state.form.error = Some(error);
                DispatchResult::changed()
            }
            Ok(item) => {
                let request = state.requests.next();
                state.pending += 1;
                state.notice = Some(Notice::info(format!("Creating {}...", item.name)));
                state.form = CreateForm::default();

                let mut effects = vec![Effect::CreateItem { request, item }];
                effects.extend(navigate(state, Route::Items));
                DispatchResult::changed_with_many(effects)
            }
        },

        // ===== Mutation results =====
        Action::ItemCreateDidLoad(item) => {
            finish_request(state);
            state.notice = Some(Notice::info(format!("Created {} (#{})", item.name, item.id)));
            if state.cache.get(item.id).is_none() {
                state.cache.append(item);
            }
            DispatchResult::changed_with_many(refetch_if_loading(state).into_iter().collect())
        }

        Action::ItemCreateDidError(error) => {
            finish_request(state);
            state.notice = Some(Notice::error(format!("Could not create item: {}", error)));
            DispatchResult::changed()
        }

        Action::ItemDelete(id) => {
            let request = state.requests.next();
            state.pending += 1;
            DispatchResult::changed_with(Effect::DeleteItem { request, id })
        }

        Action::ItemDeleteDidComplete(id) => {
            finish_request(state);
            let name = item_label(state, id);
            state.cache.remove_by_id(id);
            clamp_selection(state);
            state.notice = Some(Notice::info(format!("Deleted {}", name)));
            DispatchResult::changed_with_many(refetch_if_loading(state).into_iter().collect())
        }

        Action::ItemDeleteDidError { id, error } => {
            finish_request(state);
            state.notice = Some(Notice::error(format!(
                "Could not delete {}: {}",
                item_label(state, id),
                error
            )));
            DispatchResult::changed()
        }

        Action::ItemWithdraw(id) => {
            let request = state.requests.next();
            state.pending += 1;
            DispatchResult::changed_with(Effect::WithdrawItem {
                request,
                epoch: None,
                id,
            })
        }

        Action::ItemWithdrawDidComplete { epoch, id, item } => {
            // The server has already changed; the cache follows even if the
            // screen that asked is gone.
            let updated = apply_withdraw(state, id, item);
            let mut effects = Vec::new();

            match epoch {
                None => {
                    finish_request(state);
                    let label = updated
                        .as_ref()
                        .map(|item| item.name.clone())
                        .unwrap_or_else(|| format!("#{}", id));
                    state.notice = Some(Notice::info(format!("Withdrew one {}", label)));
                }
                Some(epoch) if epoch == state.view_epoch => {
                    if let Some(updated) = updated {
                        state.withdraw = WithdrawStatus::Done(updated);
                        effects.push(Effect::RedirectAfterWithdraw { epoch });
                    }
                }
                Some(_) => {}
            }
            effects.extend(refetch_if_loading(state));
            DispatchResult::changed_with_many(effects)
        }

        Action::ItemWithdrawDidError { epoch, id, error } => match epoch {
            None => {
                finish_request(state);
                let label = item_label(state, id);
                if error.may_have_applied() {
                    // Let the server say what the stock is now
                    state.notice = Some(Notice::error(format!(
                        "Withdrawal of {} not confirmed: {}",
                        label, error
                    )));
                    return DispatchResult::changed_with(fetch_items(state, false));
                }
                state.notice = Some(Notice::error(format!(
                    "Could not withdraw {}: {}",
                    label, error
                )));
                DispatchResult::changed()
            }
            Some(epoch) if epoch == state.view_epoch => {
                state.withdraw = if error.may_have_applied() {
                    WithdrawStatus::Unconfirmed { id, error }
                } else {
                    WithdrawStatus::Failed { id, error }
                };
                DispatchResult::changed()
            }
            Some(_) => DispatchResult::unchanged(),
        },

        // ===== View lookups =====
        Action::LookupDidLoad { epoch, item } => {
            if epoch != state.view_epoch {
                tracing::debug!(epoch, current = state.view_epoch, "dropping stale lookup");
                return DispatchResult::unchanged();
            }
            state.cache.reconcile(item.clone());

            match state.route {
                Route::Qr(id) if id == item.id => {
                    state.qr = Lookup::Loaded(item);
                    DispatchResult::changed()
                }
                Route::Withdraw(id) if id == item.id => {
                    let request = state.requests.next();
                    state.withdraw = WithdrawStatus::Withdrawing(item);
                    DispatchResult::changed_with(Effect::WithdrawItem {
                        request,
                        epoch: Some(epoch),
                        id,
                    })
                }
                _ => DispatchResult::unchanged(),
            }
        }

        Action::LookupDidError { epoch, id, error } => {
            if epoch != state.view_epoch {
                return DispatchResult::unchanged();
            }
            match state.route {
                Route::Qr(_) => state.qr = Lookup::Failed { id, error },
                Route::Withdraw(_) => state.withdraw = WithdrawStatus::Failed { id, error },
                _ => return DispatchResult::unchanged(),
            }
            DispatchResult::changed()
        }

        Action::WithdrawRedirect { epoch } => {
            if epoch != state.view_epoch {
                return DispatchResult::unchanged();
            }
            let WithdrawStatus::Done(item) = &state.withdraw else {
                return DispatchResult::unchanged();
            };
            let notice = Notice::info(format!("Withdrew one {} ({} left)", item.name, item.actual));
            let effects = navigate(state, Route::Items);
            state.notice = Some(notice);
            DispatchResult::changed_with_many(effects)
        }

        // ===== Global =====
        Action::NoticeDismiss => {
            if state.notice.take().is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            if state.is_busy() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // Handled by the runtime loop
        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Switch screens and describe the requests the new screen needs
fn navigate(state: &mut AppState, route: Route) -> Vec<Effect> {
    let mut effects = Vec::new();
    if state.route.owns_lookup() {
        effects.push(Effect::CancelViewTasks);
    }

    state.view_epoch += 1;
    state.route = route;
    state.qr = Lookup::Idle;
    state.withdraw = WithdrawStatus::Idle;

    match route {
        Route::Items => {
            state.list.searching = false;
            effects.push(fetch_items(state, false));
        }
        Route::Create => {
            state.form = CreateForm::default();
        }
        Route::Qr(id) => {
            state.qr = Lookup::Loading(id);
            effects.push(Effect::LookupItem {
                epoch: state.view_epoch,
                id,
            });
        }
        Route::Withdraw(id) => {
            state.withdraw = WithdrawStatus::Fetching(id);
            effects.push(Effect::LookupItem {
                epoch: state.view_epoch,
                id,
            });
        }
        Route::Report => {
            if state.cache.is_empty() {
                effects.push(fetch_items(state, false));
            }
        }
    }
    effects
}

/// Issue a new list request; any older one becomes stale
fn fetch_items(state: &mut AppState, debounce: bool) -> Effect {
    let seq = state.list.seq.next();
    state.list.is_loading = true;
    Effect::FetchItems {
        seq,
        filter: state.list.active_filter(),
        debounce,
    }
}

/// Reissue the list when one is in flight.
///
/// That list was issued before the mutation landed and would undo it.
fn refetch_if_loading(state: &mut AppState) -> Option<Effect> {
    if state.list.is_loading {
        Some(fetch_items(state, false))
    } else {
        None
    }
}

/// Update the cache from a withdraw result and return the item as it now is
fn apply_withdraw(state: &mut AppState, id: ItemId, item: Option<Item>) -> Option<Item> {
    match item {
        Some(updated) => {
            state.cache.reconcile(updated.clone());
            Some(updated)
        }
        None => {
            state.cache.decrement_actual(id);
            state.cache.get(id).cloned().or_else(|| match &state.withdraw {
                WithdrawStatus::Withdrawing(before) if before.id == id => {
                    let mut after = before.clone();
                    after.actual = after.actual.saturating_sub(1);
                    Some(after)
                }
                _ => None,
            })
        }
    }
}

fn finish_request(state: &mut AppState) {
    state.pending = state.pending.saturating_sub(1);
}

fn clamp_selection(state: &mut AppState) {
    let last = state.cache.len().saturating_sub(1);
    state.list.selected = state.list.selected.min(last);
}

fn item_label(state: &AppState, id: ItemId) -> String {
    state
        .cache
        .get(id)
        .map(|item| item.name.clone())
        .unwrap_or_else(|| format!("#{}", id))
}
