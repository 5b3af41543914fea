// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! ServoLifter firmware for the STM32F767ZI devboard.
//!
//! | Context | Priority | Work |
//! | ------- | -------- | ---- |
//! | `TIM2`, `TIM3` | highest | pulse completion: advance one arm one step |
//! | `USART1` | | RX byte -> byte queue; TX ring -> data register |
//! | `EXTI15_10` | | safety button -> single LOCK |
//! | `SPI1` (software) | | line task: echo, assemble, resolve |
//! | thread | lowest | dispatcher: one command at a time |

#![no_main]
#![no_std]

use cortex_m::{delay::Delay, peripheral::NVIC};
use cortex_m_rt::entry;
use defmt_rtt as _;
use panic_halt as _;

use hal::{
    pac::{self, interrupt, Interrupt},
    prelude::*,
    serial::{Config, Serial},
};
use stm32f7xx_hal as hal;

use servolifter::config::{CHANNELS, CHANNEL_COUNT, VERSION_STR};
use servolifter::control::Dispatcher;
use servolifter::glue::{ByteQueue, CommandQueue, Console, LineTask, LockTrigger, TxRing};
use servolifter::motion::{MotionEngine, ServoChannel};

mod config;
mod hw;
use config::*;
use hw::{servo_pwm, BoardPins, CycleDelay, Indicator, PwmOutputs, SafetyButton, SerialLink};
use hw::{BannerPort, ServoTimers};

static ENGINE: MotionEngine<CHANNEL_COUNT> = MotionEngine::new([
    ServoChannel::new(CHANNELS[0]),
    ServoChannel::new(CHANNELS[1]),
    ServoChannel::new(CHANNELS[2]),
    ServoChannel::new(CHANNELS[3]),
    ServoChannel::new(CHANNELS[4]),
]);

static RX_QUEUE: ByteQueue = ByteQueue::new();
static CMD_QUEUE: CommandQueue = CommandQueue::new();
static TX_RING: TxRing = TxRing::new();
static LOCK_TRIGGER: LockTrigger = LockTrigger::new();

const BUSY: Indicator = Indicator::new(INDICATOR_PIN, INDICATOR_ACTIVE_LOW);

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();
    CycleDelay::calibrate(clocks.sysclk().raw());

    // GPIO
    let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOC);
    let _servo_pins = pins.servos;
    let _button = pins.button;
    let _indicator = pins.indicator;
    BUSY.off();

    // USART1, blocking until the banner is out
    let usart_cfg = Config {
        baud_rate: BAUD_RATE.bps(),
        ..Default::default()
    };
    let serial = Serial::new(dp.USART1, (pins.usart1.tx, pins.usart1.rx), &clocks, usart_cfg);
    BannerPort::new(serial).announce(&[VERSION_STR, "Type HELP for a list of commands."]);

    // Servo timers start with every arm at its neutral width
    let _timers = ServoTimers::new(dp.TIM2, dp.TIM3, &clocks, &ENGINE);
    SafetyButton::init();
    SerialLink::listen();

    let mut nvic = cp.NVIC;
    unsafe {
        nvic.set_priority(Interrupt::TIM2, PRIO_SERVO_TIMERS);
        nvic.set_priority(Interrupt::TIM3, PRIO_SERVO_TIMERS);
        nvic.set_priority(Interrupt::USART1, PRIO_USART);
        nvic.set_priority(Interrupt::EXTI15_10, PRIO_BUTTON);
        nvic.set_priority(LINE_TASK_IRQ, PRIO_LINE_TASK);

        NVIC::unmask(Interrupt::TIM2);
        NVIC::unmask(Interrupt::TIM3);
        NVIC::unmask(Interrupt::USART1);
        NVIC::unmask(Interrupt::EXTI15_10);
        NVIC::unmask(LINE_TASK_IRQ);
    }

    defmt::info!("servolifter up, {} channels", ENGINE.len());

    // SysTick paces the motion wait
    let delay = Delay::new(cp.SYST, clocks.sysclk().raw());
    let console = Console::new(&TX_RING, SerialLink::kick, CycleDelay);
    let mut dispatcher = Dispatcher::new(&ENGINE, PwmOutputs::new(&ENGINE, BUSY), delay, console);

    loop {
        if !dispatcher.poll(&CMD_QUEUE) {
            cortex_m::asm::wfi();
        }
    }
}

#[interrupt]
fn TIM2() {
    servo_pwm::service_timer(2, &ENGINE, BUSY);
}

#[interrupt]
fn TIM3() {
    servo_pwm::service_timer(3, &ENGINE, BUSY);
}

#[interrupt]
fn USART1() {
    static mut LINK: SerialLink = SerialLink::new();
    LINK.service(&RX_QUEUE, &TX_RING);
}

#[interrupt]
fn EXTI15_10() {
    SafetyButton::service(&LOCK_TRIGGER, &CMD_QUEUE);
}

/// Line task, pended by the USART interrupt for every received byte.
#[interrupt]
fn SPI1() {
    static mut TASK: Option<LineTask<'static, CycleDelay>> = None;

    let task = TASK.get_or_insert_with(|| {
        LineTask::new(
            &RX_QUEUE,
            &CMD_QUEUE,
            Console::new(&TX_RING, SerialLink::kick, CycleDelay),
        )
    });
    task.service();
}
