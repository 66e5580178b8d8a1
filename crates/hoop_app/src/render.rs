use hoop_core::{AppViewModel, CardId, CardView, Speaker, CONSENT_VERSION};

pub fn welcome() {
    println!("CreatorHoop — perfiles sociales a guiones. Escribe 'help' para ver los comandos.");
}

pub fn help() {
    println!("Comandos:");
    println!("  mode collector|creative      cambia la pestaña activa");
    println!("  links <url> [<url> ...]      hasta 3 perfiles (Instagram/TikTok)");
    println!("  window 7d|21d|60d            ventana de recolección");
    println!("  num <n>                      cuántos guiones generar");
    println!("  sort <campo> [asc|desc]      score|views|likes|comments");
    println!("  niche|rules|level|source|customrules|lang <valor>");
    println!("  run                          analizar perfiles / generar guiones");
    println!("  single <url>                 transcribir un solo video");
    println!("  consent                      aceptar el aviso de recolección");
    println!("  refine <tarjeta> <cambio>    pedir una nueva versión del guion");
    println!("  back|fwd <tarjeta>           navegar versiones");
    println!("  copy <tarjeta>               mostrar el guion visible para copiar");
    println!("  clear                        limpiar tarjetas y formulario");
    println!("  quit                         salir");
}

pub fn render(view: &AppViewModel) {
    println!();
    println!("Estado: {} | Modo: {}", view.status, view.mode.as_str());
    if view.progress.running || view.progress.percent > 0 {
        println!("[{:>3}%] {}", view.progress.percent, view.progress.label);
    }
    if view.consent_required {
        println!(
            "Antes de continuar: se recopilarán posts públicos de los perfiles \
             indicados (aviso {CONSENT_VERSION}). Escribe 'consent' para aceptar."
        );
    }
    if let Some(alert) = &view.alert {
        println!("[AVISO] {alert}");
    }
    for card in &view.cards {
        render_card(card);
    }
}

fn render_card(card: &CardView) {
    println!();
    println!("#{} {}", card.card_id, card.url);
    println!(
        "  Views {} | Likes {} | Comments {} | Score {}",
        card.views, card.likes, card.comments, card.score
    );
    let back = if card.back_enabled { "◀" } else { "·" };
    let fwd = if card.forward_enabled { "▶" } else { "·" };
    let busy = if card.refine_busy { " (editando…)" } else { "" };
    println!(
        "  Versión {} {back}{fwd} {} — {}{busy}",
        card.indicator, card.revision_label, card.revision_created_at
    );
    for line in card.script.lines() {
        println!("  | {line}");
    }
    for entry in &card.chat {
        let who = match entry.speaker {
            Speaker::User => "tú",
            Speaker::Guideon => "guideon",
            Speaker::System => "sistema",
        };
        println!("  [{who}] {}", entry.text);
    }
}

/// Terminal counterpart of the copy button: prints the displayed revision
/// verbatim so it can be selected and copied.
pub fn copy_script(view: &AppViewModel, card_id: CardId) {
    match view.cards.iter().find(|card| card.card_id == card_id) {
        Some(card) => {
            println!("{}", card.script);
            println!("Guion copiado");
        }
        None => println!("No existe la tarjeta {card_id}"),
    }
}
